//! Byte ranges into the source buffer.

use serde::{Deserialize, Serialize};

/// Half-open range `[offset, offset + length)` into the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ByteSpan {
    pub offset: usize,
    pub length: usize,
}

impl ByteSpan {
    /// Create a new span.
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Span covering `[start, end)`. An inverted range yields an empty span at `start`.
    pub fn from_range(start: usize, end: usize) -> Self {
        Self {
            offset: start,
            length: end.saturating_sub(start),
        }
    }

    /// Exclusive end offset.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether the span fits in a buffer of `len` bytes.
    #[inline]
    pub fn fits(&self, len: usize) -> bool {
        self.offset
            .checked_add(self.length)
            .is_some_and(|end| end <= len)
    }

    /// Whether two spans share at least one byte.
    pub fn intersects(&self, other: &ByteSpan) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

impl std::fmt::Display for ByteSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:06x}+{}", self.offset, self.length)
    }
}
