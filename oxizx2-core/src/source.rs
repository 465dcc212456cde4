//! Chunked byte source for the compressed input.
//!
//! `ByteSource` pulls input from any `Read` implementation in fixed-size
//! chunks and hands it out one byte at a time. Running dry is always fatal:
//! the decoder never asks for a byte it does not need.

use crate::error::{Result, Zx2Error};
use std::io::{ErrorKind, Read};
use tracing::trace;

/// Default chunk size for input reads (64 KB).
pub const CHUNK_SIZE: usize = 65536;

/// A buffered, strictly sequential supplier of input bytes.
#[derive(Debug)]
pub struct ByteSource<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Reusable chunk buffer.
    buffer: Vec<u8>,
    /// Read position within the current chunk.
    pos: usize,
    /// Number of valid bytes in the current chunk.
    filled: usize,
    /// Total bytes ever supplied by the reader.
    supplied: u64,
    /// Set once the reader has returned end of input.
    exhausted: bool,
}

impl<R: Read> ByteSource<R> {
    /// Create a byte source with the default chunk size.
    pub fn new(reader: R) -> Result<Self> {
        Self::with_chunk_size(reader, CHUNK_SIZE)
    }

    /// Create a byte source that reads at most `chunk_size` bytes per refill.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Result<Self> {
        assert!(chunk_size > 0, "Chunk size must be greater than 0");

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(chunk_size)
            .map_err(|_| Zx2Error::allocation(chunk_size))?;
        buffer.resize(chunk_size, 0);

        Ok(Self {
            reader,
            buffer,
            pos: 0,
            filled: 0,
            supplied: 0,
            exhausted: false,
        })
    }

    /// Refill the chunk buffer, returning the number of bytes obtained.
    fn refill(&mut self) -> Result<usize> {
        if self.exhausted {
            return Ok(0);
        }

        let count = loop {
            match self.reader.read(&mut self.buffer) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Zx2Error::InputReadFailure(e)),
            }
        };

        self.pos = 0;
        self.filled = count;
        self.supplied += count as u64;
        if count == 0 {
            self.exhausted = true;
        }
        trace!(bytes = count, total = self.supplied, "input chunk read");

        Ok(count)
    }

    /// Return the next input byte.
    ///
    /// Fails with [`Zx2Error::EmptyInput`] if the input never supplied a
    /// byte, or [`Zx2Error::TruncatedInput`] if it ran out later.
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        if self.pos == self.filled && self.refill()? == 0 {
            return Err(if self.supplied == 0 {
                Zx2Error::EmptyInput
            } else {
                Zx2Error::truncated(self.supplied)
            });
        }

        let byte = self.buffer[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Returns `true` if no input remains, refilling once if necessary.
    ///
    /// Bytes pulled in by the refill stay available to [`read_byte`](Self::read_byte).
    pub fn is_drained(&mut self) -> Result<bool> {
        if self.pos < self.filled {
            return Ok(false);
        }
        Ok(self.refill()? == 0)
    }

    /// Number of bytes handed out so far.
    pub fn consumed(&self) -> u64 {
        self.supplied - (self.filled - self.pos) as u64
    }

    /// Chunk size used for refills.
    pub fn chunk_size(&self) -> usize {
        self.buffer.len()
    }

    /// Consume this source and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// Reader that fails once with `Interrupted` before every successful read.
    struct Flaky<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl Read for Flaky<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.interrupt {
                self.interrupt = false;
                return Err(io::Error::new(ErrorKind::Interrupted, "signal"));
            }
            self.interrupt = true;
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn test_reads_across_chunks() {
        let mut source = ByteSource::with_chunk_size(Cursor::new(vec![1, 2, 3, 4, 5]), 2).unwrap();
        assert_eq!(source.chunk_size(), 2);
        for expected in 1..=5 {
            assert_eq!(source.read_byte().unwrap(), expected);
            assert_eq!(source.consumed(), expected as u64);
        }
        assert!(source.is_drained().unwrap());
        assert_eq!(source.into_inner().position(), 5);
    }

    #[test]
    fn test_empty_input() {
        let mut source = ByteSource::new(Cursor::new(Vec::new())).unwrap();
        assert!(matches!(source.read_byte(), Err(Zx2Error::EmptyInput)));
    }

    #[test]
    fn test_truncated_input() {
        let mut source = ByteSource::with_chunk_size(Cursor::new(vec![7, 8, 9]), 2).unwrap();
        for _ in 0..3 {
            source.read_byte().unwrap();
        }
        match source.read_byte() {
            Err(Zx2Error::TruncatedInput { consumed }) => assert_eq!(consumed, 3),
            other => panic!("expected TruncatedInput, got {:?}", other),
        }
        // Stays truncated rather than reverting to "empty".
        assert!(matches!(
            source.read_byte(),
            Err(Zx2Error::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_drained_check_keeps_next_chunk() {
        let mut source = ByteSource::with_chunk_size(Cursor::new(vec![1, 2, 3]), 2).unwrap();
        source.read_byte().unwrap();
        source.read_byte().unwrap();

        // Chunk exhausted but more input exists.
        assert!(!source.is_drained().unwrap());
        assert_eq!(source.consumed(), 2);
        assert_eq!(source.read_byte().unwrap(), 3);
        assert!(source.is_drained().unwrap());
    }

    #[test]
    fn test_interrupted_reads_are_retried() {
        let reader = Flaky {
            data: b"ok",
            interrupt: true,
        };
        let mut source = ByteSource::with_chunk_size(reader, 1).unwrap();
        assert_eq!(source.read_byte().unwrap(), b'o');
        assert_eq!(source.read_byte().unwrap(), b'k');
    }

    #[test]
    fn test_read_failure() {
        let mut source = ByteSource::new(Broken).unwrap();
        assert!(matches!(
            source.read_byte(),
            Err(Zx2Error::InputReadFailure(_))
        ));
    }
}
