//! MSB-first bit extraction over the shared input stream.
//!
//! ZX2 interleaves control bits with raw literal and offset bytes in a single
//! byte stream. A byte holding control bits is fetched when the first of its
//! bits is needed, and its remaining bits are consumed by later bit reads even
//! if raw bytes are read in between. Raw reads therefore go straight to the
//! [`ByteSource`] and never touch the pending bits.
//!
//! # Example
//!
//! ```
//! use oxizx2_core::bitstream::BitCursor;
//! use oxizx2_core::source::ByteSource;
//! use std::io::Cursor;
//!
//! let source = ByteSource::new(Cursor::new(vec![0b1010_0000, 0x41])).unwrap();
//! let mut bits = BitCursor::new(source);
//! assert_eq!(bits.read_bit().unwrap(), 1);
//! assert_eq!(bits.read_byte().unwrap(), 0x41);
//! assert_eq!(bits.read_bit().unwrap(), 0);
//! assert_eq!(bits.read_bit().unwrap(), 1);
//! ```

use crate::error::Result;
use crate::source::ByteSource;
use std::io::Read;

/// Reads single bits, most significant first, from a [`ByteSource`].
#[derive(Debug)]
pub struct BitCursor<R: Read> {
    /// Shared input stream.
    source: ByteSource<R>,
    /// Byte currently being mined for bits.
    value: u8,
    /// Mask of the last bit returned; zero when no bits remain.
    mask: u8,
}

impl<R: Read> BitCursor<R> {
    /// Create a bit cursor over the given byte source.
    pub fn new(source: ByteSource<R>) -> Self {
        Self {
            source,
            value: 0,
            mask: 0,
        }
    }

    /// Read one bit, fetching a fresh byte when the current one is spent.
    #[inline]
    pub fn read_bit(&mut self) -> Result<u8> {
        self.mask >>= 1;
        if self.mask == 0 {
            self.mask = 0x80;
            self.value = self.source.read_byte()?;
        }
        Ok(u8::from(self.value & self.mask != 0))
    }

    /// Read one raw byte from the shared stream.
    ///
    /// Pending bits of the current bit byte are left untouched.
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        self.source.read_byte()
    }

    /// Number of bits of the current bit byte not yet returned.
    pub fn pending_bits(&self) -> u32 {
        if self.mask == 0 {
            0
        } else {
            self.mask.trailing_zeros()
        }
    }

    /// Get a reference to the underlying byte source.
    pub fn get_ref(&self) -> &ByteSource<R> {
        &self.source
    }

    /// Get a mutable reference to the underlying byte source.
    pub fn get_mut(&mut self) -> &mut ByteSource<R> {
        &mut self.source
    }

    /// Consume this cursor and return the underlying byte source.
    pub fn into_inner(self) -> ByteSource<R> {
        self.source
    }
}
