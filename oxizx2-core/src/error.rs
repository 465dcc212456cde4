//! Error types for ZX2 decoding.
//!
//! Every variant is fatal: the decoder never retries and never rolls back
//! output that has already been flushed to the sink.

use std::io;
use thiserror::Error;

/// The error type for ZX2 operations.
#[derive(Debug, Error)]
pub enum Zx2Error {
    /// The input ended before a single byte could be read.
    #[error("Empty input")]
    EmptyInput,

    /// The input ended in the middle of the compressed stream.
    #[error("Truncated input after {consumed} bytes")]
    TruncatedInput {
        /// Number of input bytes delivered before the stream ran dry.
        consumed: u64,
    },

    /// A decoded block length exceeds the permitted maximum.
    #[error("Large block length {value} in input (limit {limit})")]
    OversizedLength {
        /// The decoded value, or the partial value when decoding overflowed.
        value: u64,
        /// The limit that was exceeded.
        limit: u64,
    },

    /// A back-reference points before the start of the output.
    #[error("Invalid data in input: back-reference offset {offset} with {available} bytes of output")]
    InvalidBackReference {
        /// The offending offset.
        offset: usize,
        /// Bytes produced so far.
        available: u64,
    },

    /// Input bytes remain after the end-of-stream marker.
    #[error("Input too long: trailing data after {consumed} bytes")]
    TrailingInputData {
        /// Number of input bytes consumed up to and including the marker.
        consumed: u64,
    },

    /// The output sink rejected a write.
    #[error("Cannot write output: {0}")]
    OutputWriteFailure(#[source] io::Error),

    /// A working buffer could not be allocated.
    #[error("Insufficient memory: cannot allocate {requested} bytes")]
    AllocationFailure {
        /// Number of bytes requested.
        requested: usize,
    },

    /// The input source reported an I/O error.
    #[error("Cannot read input: {0}")]
    InputReadFailure(#[source] io::Error),
}

/// Result type alias for ZX2 operations.
pub type Result<T> = std::result::Result<T, Zx2Error>;

impl Zx2Error {
    /// Create a truncated input error.
    pub fn truncated(consumed: u64) -> Self {
        Self::TruncatedInput { consumed }
    }

    /// Create an oversized length error.
    pub fn oversized_length(value: u64, limit: u64) -> Self {
        Self::OversizedLength { value, limit }
    }

    /// Create an invalid back-reference error.
    pub fn invalid_back_reference(offset: usize, available: u64) -> Self {
        Self::InvalidBackReference { offset, available }
    }

    /// Create a trailing input error.
    pub fn trailing_input(consumed: u64) -> Self {
        Self::TrailingInputData { consumed }
    }

    /// Create an allocation failure error.
    pub fn allocation(requested: usize) -> Self {
        Self::AllocationFailure { requested }
    }

    /// Returns `true` when the failure belongs to the output sink rather than
    /// the input stream.
    pub fn is_output_error(&self) -> bool {
        matches!(self, Self::OutputWriteFailure(_))
    }
}
