//! # OxiZX2: Pure Rust ZX2 Decompression
//!
//! This crate decodes streams produced by the ZX2 compressor, a tiny LZ77
//! variant designed for 8-bit machines.
//!
//! ## Format
//!
//! - **Shared byte stream**: control bits (MSB-first) and raw bytes are
//!   interleaved in one stream; a byte holding control bits is fetched when
//!   its first bit is needed
//! - **Interlaced Elias-gamma lengths**: see [`gamma`]
//! - **One-byte offsets**: a new offset is stored as `255 - offset`
//! - **End marker**: offset byte `0xFF`
//! - **Last-offset reuse**: a copy may reuse the previous offset without
//!   storing it again
//!
//! ## Example
//!
//! ```rust
//! use oxizx2::{decompress, Zx2Config};
//!
//! // Two literal bytes followed by the end marker.
//! let compressed = [0x90, b'A', b'B', 0xFF];
//! let output = decompress(&compressed, Zx2Config::STANDARD).unwrap();
//! assert_eq!(output, b"AB");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
pub mod gamma;

pub use config::Zx2Config;
pub use decoder::{DecodeStats, State, Zx2Decoder};
pub use oxizx2_core::error::{Result, Zx2Error};

use std::io::{Read, Write};

/// Decompress an in-memory ZX2 stream.
///
/// # Example
///
/// ```rust
/// use oxizx2::{decompress, Zx2Config};
///
/// // "x", then ten copies from offset 1, then the end marker.
/// let compressed = [0x2E, b'x', 0x40, 0xFF];
/// let output = decompress(&compressed, Zx2Config::STANDARD).unwrap();
/// assert_eq!(output, vec![b'x'; 11]);
/// ```
pub fn decompress(data: &[u8], config: Zx2Config) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    Zx2Decoder::new(config).decode(data, &mut output)?;
    Ok(output)
}

/// Decompress a ZX2 stream from `reader` into `writer`.
///
/// Returns the number of bytes consumed and produced.
///
/// # Example
///
/// ```rust
/// use oxizx2::{decompress_stream, Zx2Config};
/// use std::io::Cursor;
///
/// let mut output = Vec::new();
/// let stats = decompress_stream(
///     Cursor::new(vec![0x90, b'A', b'B', 0xFF]),
///     &mut output,
///     Zx2Config::STANDARD,
/// )
/// .unwrap();
/// assert_eq!(stats.input_bytes, 4);
/// assert_eq!(stats.output_bytes, 2);
/// ```
pub fn decompress_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    config: Zx2Config,
) -> Result<DecodeStats> {
    Zx2Decoder::new(config).decode(reader, writer)
}
