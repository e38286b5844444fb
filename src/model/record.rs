//! Typed records assembled by the extractor, with provenance.

use super::ByteSpan;
use crate::config::ScanMode;
use serde::{Deserialize, Serialize};

/// A plausible coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatePoint {
    pub x: f64,
    pub y: f64,
    /// The 16 bytes the pair was decoded from.
    pub source_span: ByteSpan,
    pub confidence: f64,
    /// Scan alignment that produced the pair.
    pub method: ScanMode,
}

impl CoordinatePoint {
    pub fn new(x: f64, y: f64, source_span: ByteSpan, confidence: f64, method: ScanMode) -> Self {
        Self {
            x,
            y,
            source_span,
            confidence,
            method,
        }
    }
}

/// A confirmed tool/punch descriptor found in embedded text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolReference {
    /// Permissively decoded, trimmed context around the hit.
    pub raw_context: String,
    /// Context window the text was decoded from.
    pub source_span: ByteSpan,
    pub keyword: String,
    pub hit_offset: usize,
    /// Confirmation term found in the context.
    pub confirmation: String,
}

/// A deduplicated embedded string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedString {
    pub text: String,
    /// First occurrence.
    pub span: ByteSpan,
    pub occurrences: usize,
    pub confidence: f64,
}

/// A frequent fixed-width byte pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCount {
    pub bytes: Vec<u8>,
    pub count: usize,
    pub first_offset: usize,
}

impl PatternCount {
    /// Space-separated lowercase hex, e.g. `00 00 80 3f`.
    pub fn hex(&self) -> String {
        self.bytes
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
