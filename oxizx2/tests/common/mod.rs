//! Test helpers: a minimal ZX2 stream packer and a flat reference model.

#![allow(dead_code)]

use oxizx2::Zx2Config;

/// One block of a ZX2 stream.
#[derive(Debug, Clone)]
pub enum Block {
    /// Raw bytes copied verbatim.
    Literal(Vec<u8>),
    /// Copy of `length` bytes from the previous offset.
    LastOffset(u32),
    /// Copy from a new offset; `length` is the stored value before the bias.
    NewOffset { offset: u8, length: u32 },
}

/// Packs bits and raw bytes the way the ZX2 compressor lays them out.
#[derive(Debug, Default)]
pub struct StreamBuilder {
    out: Vec<u8>,
    bit_index: usize,
    bit_mask: u8,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bit(&mut self, bit: bool) {
        if self.bit_mask == 0 {
            self.bit_mask = 0x80;
            self.bit_index = self.out.len();
            self.out.push(0);
        }
        if bit {
            self.out[self.bit_index] |= self.bit_mask;
        }
        self.bit_mask >>= 1;
    }

    pub fn byte(&mut self, byte: u8) {
        self.out.push(byte);
    }

    pub fn gamma(&mut self, value: u32) {
        assert!(value > 0, "gamma codes start at 1");
        let width = 32 - value.leading_zeros();
        for i in (0..width - 1).rev() {
            self.bit(true);
            self.bit((value >> i) & 1 == 1);
        }
        self.bit(false);
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.out
    }
}

/// Encode a block sequence followed by the end marker.
///
/// The sequence must start with a literal and must not put two literals or
/// two last-offset copies next to each other.
pub fn encode(blocks: &[Block]) -> Vec<u8> {
    let mut builder = StreamBuilder::new();
    for (i, block) in blocks.iter().enumerate() {
        match block {
            Block::Literal(bytes) => {
                builder.gamma(bytes.len() as u32);
                for &b in bytes {
                    builder.byte(b);
                }
            }
            Block::LastOffset(length) => builder.gamma(*length),
            Block::NewOffset { offset, length } => {
                builder.byte(255 - offset);
                builder.gamma(*length);
            }
        }
        let next_is_new_offset = matches!(blocks.get(i + 1), None | Some(Block::NewOffset { .. }));
        builder.bit(next_is_new_offset);
    }
    builder.byte(0xFF);
    builder.into_vec()
}

/// Expected output of a block sequence, computed on a flat buffer.
pub fn expand(blocks: &[Block], config: Zx2Config) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    let mut last_offset = config.default_offset;
    for block in blocks {
        let (offset, length) = match block {
            Block::Literal(bytes) => {
                out.extend_from_slice(bytes);
                continue;
            }
            Block::LastOffset(length) => (last_offset, *length as usize),
            Block::NewOffset { offset, length } => {
                last_offset = *offset as usize;
                (last_offset, *length as usize + config.min_length - 1)
            }
        };
        for _ in 0..length {
            out.push(out[out.len() - offset]);
        }
    }
    out
}

/// Deterministic pseudo-random bytes.
pub fn noise(len: usize, mut seed: u64) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (seed >> 33) as u8
        })
        .collect()
}
