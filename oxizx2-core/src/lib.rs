//! # OxiZX2 Core
//!
//! Core components for the OxiZX2 decompressor.
//!
//! - [`source`]: Chunked byte source over any `Read`
//! - [`bitstream`]: MSB-first bit cursor sharing the byte source with raw reads
//! - [`window`]: Circular output window with back-reference copying
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI: dzx2                                               │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec: oxizx2 (gamma lengths, state machine)            │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     ByteSource, BitCursor, OutputWindow                 │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxizx2_core::{BitCursor, ByteSource, OutputWindow};
//! use std::io::Cursor;
//!
//! let mut bits = BitCursor::new(ByteSource::new(Cursor::new(vec![0x80, b'x'])).unwrap());
//! let mut window = OutputWindow::new(Vec::new()).unwrap();
//!
//! assert_eq!(bits.read_bit().unwrap(), 1);
//! window.write_byte(bits.read_byte().unwrap()).unwrap();
//! window.copy_match(1, 3).unwrap();
//! window.finish().unwrap();
//!
//! assert_eq!(window.get_ref().as_slice(), b"xxxx");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;
pub mod source;
pub mod window;

pub use bitstream::BitCursor;
pub use error::{Result, Zx2Error};
pub use source::{ByteSource, CHUNK_SIZE};
pub use window::{MAX_OFFSET, OutputWindow, WINDOW_SIZE};
