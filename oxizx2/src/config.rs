//! ZX2 decoder configuration.

/// Format variant knobs. Each one must match the options the stream was
/// compressed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zx2Config {
    /// Offset used by a last-offset copy before any new offset was read.
    pub default_offset: usize,
    /// Shortest copy from a new offset; the decoded length is biased by
    /// `min_length - 1`. Must be at least 1.
    pub min_length: usize,
    /// Reject any decoded length above 255.
    pub limited_length: bool,
}

impl Zx2Config {
    /// Standard ZX2 configuration.
    ///
    /// - Default offset 1
    /// - Minimum new-offset copy length 2
    /// - Unlimited lengths
    pub const STANDARD: Self = Self {
        default_offset: 1,
        min_length: 2,
        limited_length: false,
    };

    /// Create a configuration from explicit values.
    ///
    /// # Panics
    ///
    /// Panics if `min_length` is zero.
    pub fn new(default_offset: usize, min_length: usize, limited_length: bool) -> Self {
        assert!(min_length > 0, "Minimum length must be at least 1");
        Self {
            default_offset,
            min_length,
            limited_length,
        }
    }

    /// Use 0 instead of 1 as the initial offset (`-z`).
    pub fn with_zero_default_offset(mut self) -> Self {
        self.default_offset = 0;
        self
    }

    /// Skip the length increment for new-offset copies (`-x`).
    pub fn with_skipped_increment(mut self) -> Self {
        self.min_length = 1;
        self
    }

    /// Cap every decoded length to one byte (`-y`).
    pub fn with_limited_length(mut self) -> Self {
        self.limited_length = true;
        self
    }

    /// Length added to every decoded new-offset length.
    pub fn length_bias(&self) -> usize {
        self.min_length - 1
    }
}

impl Default for Zx2Config {
    fn default() -> Self {
        Self::STANDARD
    }
}
