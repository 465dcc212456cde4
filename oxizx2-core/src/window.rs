//! Circular output window for ZX2 decompression.
//!
//! The window batches decoded bytes before handing them to the sink and
//! doubles as the back-reference history. Flushing only rewinds the write
//! position; the buffer keeps its contents, so a back-reference may reach
//! across a flush boundary.

use crate::error::{Result, Zx2Error};
use std::io::Write;
use tracing::trace;

/// Window size used by the decoder (64 KB).
pub const WINDOW_SIZE: usize = 65536;

/// Largest offset a ZX2 stream can encode.
pub const MAX_OFFSET: usize = 255;

/// Fixed-capacity output buffer with back-reference support.
#[derive(Debug)]
pub struct OutputWindow<W: Write> {
    /// Destination for flushed bytes.
    sink: W,
    /// Circular buffer holding the most recent output.
    buffer: Vec<u8>,
    /// Next write position within `buffer`.
    position: usize,
    /// Bytes already handed to the sink.
    flushed: u64,
}

impl<W: Write> OutputWindow<W> {
    /// Create a window of [`WINDOW_SIZE`] bytes.
    pub fn new(sink: W) -> Result<Self> {
        Self::with_capacity(sink, WINDOW_SIZE)
    }

    /// Create a window with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` does not exceed [`MAX_OFFSET`].
    pub fn with_capacity(sink: W, capacity: usize) -> Result<Self> {
        assert!(
            capacity > MAX_OFFSET,
            "Window capacity must exceed {}, got {}",
            MAX_OFFSET,
            capacity
        );

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|_| Zx2Error::allocation(capacity))?;
        buffer.resize(capacity, 0);

        Ok(Self {
            sink,
            buffer,
            position: 0,
            flushed: 0,
        })
    }

    /// Get the capacity of the window.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Total bytes produced, flushed or not.
    pub fn total_written(&self) -> u64 {
        self.flushed + self.position as u64
    }

    /// Bytes produced but not yet handed to the sink.
    pub fn pending(&self) -> &[u8] {
        &self.buffer[..self.position]
    }

    /// Append one byte, flushing the whole buffer when it fills up.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.buffer[self.position] = byte;
        self.position += 1;
        if self.position == self.buffer.len() {
            self.flush_buffer()?;
        }
        Ok(())
    }

    /// Copy `length` bytes starting `offset` bytes behind the write position.
    ///
    /// Bytes are copied one at a time, so `offset < length` repeats the
    /// last `offset` bytes.
    pub fn copy_match(&mut self, offset: usize, length: usize) -> Result<()> {
        let available = self.total_written();
        if offset == 0 || offset as u64 > available || offset > self.buffer.len() {
            return Err(Zx2Error::invalid_back_reference(offset, available));
        }

        for _ in 0..length {
            let index = if self.position >= offset {
                self.position - offset
            } else {
                self.buffer.len() + self.position - offset
            };
            self.write_byte(self.buffer[index])?;
        }

        Ok(())
    }

    /// Hand buffered bytes to the sink and rewind the write position.
    fn flush_buffer(&mut self) -> Result<()> {
        if self.position == 0 {
            return Ok(());
        }
        self.sink
            .write_all(&self.buffer[..self.position])
            .map_err(Zx2Error::OutputWriteFailure)?;
        self.flushed += self.position as u64;
        trace!(bytes = self.position, total = self.flushed, "window flushed");
        self.position = 0;
        Ok(())
    }

    /// Flush everything to the sink and return the total output size.
    pub fn finish(&mut self) -> Result<u64> {
        self.flush_buffer()?;
        self.sink.flush().map_err(Zx2Error::OutputWriteFailure)?;
        Ok(self.flushed)
    }

    /// Get a reference to the sink.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Consume the window and return the sink. Unflushed bytes are dropped.
    pub fn into_inner(self) -> W {
        self.sink
    }
}
