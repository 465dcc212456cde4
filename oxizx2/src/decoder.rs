//! ZX2 decoder (decompression).
//!
//! The stream is a sequence of blocks, each followed by one control bit that
//! selects the next block:
//!
//! ```text
//!              0                    0
//!   Literal ------> LastOffset ----------> Literal
//!      |                |
//!      | 1              | 1
//!      v                v
//!   NewOffset <---------+      NewOffset --1--> NewOffset
//!                              NewOffset --0--> Literal
//! ```
//!
//! A new-offset block whose offset byte is `0xFF` ends the stream.

use crate::config::Zx2Config;
use crate::gamma;
use oxizx2_core::bitstream::BitCursor;
use oxizx2_core::error::{Result, Zx2Error};
use oxizx2_core::source::{ByteSource, CHUNK_SIZE};
use oxizx2_core::window::OutputWindow;
use std::io::{Read, Write};
use tracing::{debug, trace};

/// Block kinds of a ZX2 stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Copy raw bytes from the input.
    Literal,
    /// Copy from the most recently used offset.
    LastOffset,
    /// Read a fresh offset byte, then copy from it.
    NewOffset,
}

/// Summary of a finished decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Compressed bytes consumed, including the end marker.
    pub input_bytes: u64,
    /// Decompressed bytes written to the sink.
    pub output_bytes: u64,
    /// Raw reads (literal runs and offset bytes) that started while control
    /// bits of an earlier byte were still pending.
    pub interleaved_reads: u64,
}

/// ZX2 decoder for decompression.
#[derive(Debug, Clone)]
pub struct Zx2Decoder {
    /// Format variant.
    config: Zx2Config,
    /// Input chunk size.
    chunk_size: usize,
}

impl Zx2Decoder {
    /// Create a new decoder with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config.min_length` is zero.
    pub fn new(config: Zx2Config) -> Self {
        assert!(config.min_length > 0, "Minimum length must be at least 1");
        Self {
            config,
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Set the input chunk size. Does not affect the decoded output.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Chunk size must be greater than 0");
        self.chunk_size = chunk_size;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &Zx2Config {
        &self.config
    }

    /// Decode a complete ZX2 stream from `reader` into `writer`.
    ///
    /// The whole input must be consumed: bytes after the end marker fail
    /// with [`Zx2Error::TrailingInputData`]. On error, output flushed before
    /// the failure stays in `writer`.
    pub fn decode<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<DecodeStats> {
        debug!(config = ?self.config, chunk_size = self.chunk_size, "starting ZX2 decode");

        let source = ByteSource::with_chunk_size(reader, self.chunk_size)?;
        let mut session = Session {
            bits: BitCursor::new(source),
            window: OutputWindow::new(writer)?,
            last_offset: self.config.default_offset,
            config: self.config,
            interleaved_reads: 0,
        };

        let mut state = State::Literal;
        while let Some(next) = session.step(state)? {
            trace!(from = ?state, to = ?next, "block");
            state = next;
        }

        let output_bytes = session.window.finish()?;
        let source = session.bits.get_mut();
        if !source.is_drained()? {
            return Err(Zx2Error::trailing_input(source.consumed()));
        }

        let stats = DecodeStats {
            input_bytes: source.consumed(),
            output_bytes,
            interleaved_reads: session.interleaved_reads,
        };
        debug!(
            input = stats.input_bytes,
            output = stats.output_bytes,
            interleaved = stats.interleaved_reads,
            "ZX2 decode complete"
        );

        Ok(stats)
    }
}

/// Per-invocation decoding state.
struct Session<R: Read, W: Write> {
    bits: BitCursor<R>,
    window: OutputWindow<W>,
    last_offset: usize,
    config: Zx2Config,
    interleaved_reads: u64,
}

impl<R: Read, W: Write> Session<R, W> {
    /// Decode one block; `None` means the end marker was read.
    fn step(&mut self, state: State) -> Result<Option<State>> {
        match state {
            State::Literal => self.copy_literals().map(Some),
            State::LastOffset => self.copy_from_last_offset().map(Some),
            State::NewOffset => self.copy_from_new_offset(),
        }
    }

    fn copy_literals(&mut self) -> Result<State> {
        let length = gamma::decode(&mut self.bits, self.config.limited_length)?;
        self.note_raw_read();
        for _ in 0..length {
            let byte = self.bits.read_byte()?;
            self.window.write_byte(byte)?;
        }

        Ok(if self.bits.read_bit()? == 1 {
            State::NewOffset
        } else {
            State::LastOffset
        })
    }

    fn copy_from_last_offset(&mut self) -> Result<State> {
        let length = gamma::decode(&mut self.bits, self.config.limited_length)?;
        self.window.copy_match(self.last_offset, length)?;

        Ok(if self.bits.read_bit()? == 1 {
            State::NewOffset
        } else {
            State::Literal
        })
    }

    fn copy_from_new_offset(&mut self) -> Result<Option<State>> {
        self.note_raw_read();
        let offset = 255 - usize::from(self.bits.read_byte()?);
        if offset == 0 {
            return Ok(None);
        }
        self.last_offset = offset;

        let length = gamma::decode(&mut self.bits, self.config.limited_length)?
            + self.config.length_bias();
        self.window.copy_match(offset, length)?;

        Ok(Some(if self.bits.read_bit()? == 1 {
            State::NewOffset
        } else {
            State::Literal
        }))
    }

    /// Flag a raw read that lands between bits of a partly consumed byte.
    fn note_raw_read(&mut self) {
        let pending = self.bits.pending_bits();
        if pending > 0 {
            self.interleaved_reads += 1;
            trace!(
                pending,
                position = self.bits.get_ref().consumed(),
                "raw read with control bits pending"
            );
        }
    }
}
