//! Bounds-checked view over an immutable byte buffer.

use crate::error::{ProbeError, Result};
use crate::model::ByteSpan;

/// Byte cursor over a borrowed buffer. Reads never panic.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor. Seeking to `len()` is allowed.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(self.out_of_bounds(offset, 0));
        }
        self.pos = offset;
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn out_of_bounds(&self, offset: usize, width: usize) -> ProbeError {
        ProbeError::OutOfBounds {
            offset,
            width,
            len: self.data.len(),
        }
    }

    fn fixed<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let end = offset
            .checked_add(N)
            .ok_or_else(|| self.out_of_bounds(offset, N))?;
        let bytes = self
            .data
            .get(offset..end)
            .ok_or_else(|| self.out_of_bounds(offset, N))?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Little-endian u32 at `offset`.
    pub fn read_u32_le(&self, offset: usize) -> Result<u32> {
        self.fixed::<4>(offset).map(u32::from_le_bytes)
    }

    /// Little-endian IEEE-754 double at `offset`.
    pub fn read_f64_le(&self, offset: usize) -> Result<f64> {
        self.fixed::<8>(offset).map(f64::from_le_bytes)
    }

    /// Read a u32 at the cursor and advance past it.
    pub fn next_u32_le(&mut self) -> Result<u32> {
        let value = self.read_u32_le(self.pos)?;
        self.pos += 4;
        Ok(value)
    }

    /// Read a double at the cursor and advance past it.
    pub fn next_f64_le(&mut self) -> Result<f64> {
        let value = self.read_f64_le(self.pos)?;
        self.pos += 8;
        Ok(value)
    }

    /// First occurrence of `needle` at or after `from`. An empty needle never matches.
    pub fn find_ascii(&self, needle: impl AsRef<[u8]>, from: usize) -> Option<usize> {
        let needle = needle.as_ref();
        if needle.is_empty() || from >= self.data.len() {
            return None;
        }
        self.data[from..]
            .windows(needle.len())
            .position(|w| w == needle)
            .map(|i| i + from)
    }

    /// Bytes covered by `span`.
    pub fn slice(&self, span: ByteSpan) -> Result<&'a [u8]> {
        if !span.fits(self.data.len()) {
            return Err(self.out_of_bounds(span.offset, span.length));
        }
        Ok(&self.data[span.offset..span.end()])
    }
}

/// Decode bytes as text, replacing invalid sequences with U+FFFD.
pub fn decode_permissive(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
