//! Decoded file header.

use super::ByteSpan;
use crate::config::HeaderRole;
use serde::{Deserialize, Serialize};

/// A header table entry that was found in the buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderFieldMatch {
    pub label: String,
    pub role: HeaderRole,
    /// Permissively decoded text.
    pub text: String,
    pub span: ByteSpan,
    /// False when the terminator was not found and the text was cut at the length cap.
    pub terminated: bool,
}

/// Header metadata. Absent fields mean reduced confidence, not failure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Header {
    pub magic: u32,
    pub timestamp: Option<String>,
    pub software_version: Option<String>,
    /// Every table entry that was present, in table order.
    pub fields: Vec<HeaderFieldMatch>,
}

impl Header {
    /// Magic rendered as `0x%08x`.
    pub fn magic_hex(&self) -> String {
        format!("0x{:08x}", self.magic)
    }

    /// Find a present field by label.
    pub fn field(&self, label: &str) -> Option<&HeaderFieldMatch> {
        self.fields.iter().find(|f| f.label == label)
    }
}
