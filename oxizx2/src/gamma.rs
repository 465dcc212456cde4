//! Interlaced Elias-gamma lengths.
//!
//! Every data bit is preceded by a continuation bit: `1` means a data bit
//! follows and is shifted into the value, `0` ends the code. The value
//! starts at 1, so the code can only express positive integers.
//!
//! ```text
//! 1   -> 0
//! 2   -> 1 0 0
//! 3   -> 1 1 0
//! 5   -> 1 0 1 1 0
//! ```

use oxizx2_core::bitstream::BitCursor;
use oxizx2_core::error::{Result, Zx2Error};
use std::io::Read;

/// Largest length the decoder accepts.
pub const MAX_LENGTH: u32 = i32::MAX as u32;

/// Length limit in limited-length mode.
pub const BYTE_LIMIT: u32 = 255;

/// Decode one interlaced Elias-gamma value.
///
/// With `limited` set, values above [`BYTE_LIMIT`] fail with
/// [`Zx2Error::OversizedLength`] once the whole code has been read. Values
/// that would grow past [`MAX_LENGTH`] fail as soon as the overflow is seen.
pub fn decode<R: Read>(bits: &mut BitCursor<R>, limited: bool) -> Result<usize> {
    let mut value: u32 = 1;

    while bits.read_bit()? == 1 {
        if value > MAX_LENGTH >> 1 {
            return Err(Zx2Error::oversized_length(
                u64::from(value) << 1,
                u64::from(MAX_LENGTH),
            ));
        }
        value = (value << 1) | u32::from(bits.read_bit()?);
    }

    if limited && value > BYTE_LIMIT {
        return Err(Zx2Error::oversized_length(
            u64::from(value),
            u64::from(BYTE_LIMIT),
        ));
    }

    Ok(value as usize)
}
