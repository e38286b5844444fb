//! Configuration constants and settings for the probe.
//!
//! Everything the scanners treat as format knowledge lives here so it can be
//! re-tuned per sample family without touching code. Every struct is
//! deserializable from JSON with all fields defaulted.

use crate::error::{ProbeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Width of the magic number at offset 0.
pub const MAGIC_LEN: usize = 4;

/// Bytes assumed to belong to the header before coordinate data starts.
pub const DEFAULT_HEADER_LEN: usize = 100;

/// Longest text extracted for a single header field.
pub const DEFAULT_HEADER_FIELD_MAX_LEN: usize = 128;

/// Values closer to zero than this are treated as padding.
pub const DEFAULT_EPSILON: f64 = 0.0001;

/// Lower plausibility bound for coordinates.
pub const DEFAULT_MIN_BOUND: f64 = -500.0;

/// Upper plausibility bound for coordinates.
pub const DEFAULT_MAX_BOUND: f64 = 500.0;

/// Absolute limit applied on top of the bounds in strict mode.
pub const DEFAULT_STRICT_LIMIT: f64 = 100.0;

/// Bytes of context kept before a tool keyword hit.
pub const DEFAULT_CONTEXT_BEFORE: usize = 50;

/// Bytes of context kept from the start of a tool keyword hit.
pub const DEFAULT_CONTEXT_AFTER: usize = 100;

/// Printable runs must be strictly longer than this.
pub const DEFAULT_MIN_STRING_LEN: usize = 4;

/// Ranked strings kept in the report.
pub const DEFAULT_STRING_TOP_K: usize = 15;

/// Width of a pattern-frequency window.
pub const PATTERN_WIDTH: usize = 4;

/// Patterns seen fewer times than this are dropped.
pub const DEFAULT_PATTERN_MIN_OCCURRENCES: usize = 5;

/// Patterns kept in the report.
pub const DEFAULT_PATTERN_TOP_K: usize = 10;

/// What a header field means once found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderRole {
    Timestamp,
    SoftwareVersion,
    #[default]
    Custom,
}

/// Where a header field's text stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminator {
    /// Stop before the first occurrence of this byte.
    Byte(u8),
    /// Stop before the first occurrence of this byte string.
    Pattern(String),
}

impl Terminator {
    /// Bytes to search for.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Terminator::Byte(b) => std::slice::from_ref(b),
            Terminator::Pattern(p) => p.as_bytes(),
        }
    }
}

/// One entry of the header lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderField {
    /// Name reported for the field.
    pub label: String,
    /// Meaning of the field.
    #[serde(default)]
    pub role: HeaderRole,
    /// Alternative byte strings that start the field; earliest match wins.
    pub patterns: Vec<String>,
    /// End of the field text (exclusive).
    pub terminator: Terminator,
}

impl HeaderField {
    /// Create a field with a single search pattern.
    pub fn new(
        label: impl Into<String>,
        role: HeaderRole,
        pattern: impl Into<String>,
        terminator: Terminator,
    ) -> Self {
        Self {
            label: label.into(),
            role,
            patterns: vec![pattern.into()],
            terminator,
        }
    }

    /// ctime-style timestamp ("Wed Jul 10 ..."), terminated by a newline.
    pub fn ctime_timestamp() -> Self {
        Self {
            label: "timestamp".to_string(),
            role: HeaderRole::Timestamp,
            patterns: ["Mon ", "Tue ", "Wed ", "Thu ", "Fri ", "Sat ", "Sun "]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            terminator: Terminator::Byte(b'\n'),
        }
    }

    /// Software version string, NUL-terminated.
    pub fn software_version(pattern: impl Into<String>) -> Self {
        Self::new(
            "software",
            HeaderRole::SoftwareVersion,
            pattern,
            Terminator::Byte(0),
        )
    }
}

/// Header decoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Header length; also the minimum accepted buffer size.
    pub header_len: usize,
    /// Longest text extracted per field.
    pub max_field_len: usize,
    /// Lookup table of text fields.
    pub fields: Vec<HeaderField>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            header_len: DEFAULT_HEADER_LEN,
            max_field_len: DEFAULT_HEADER_FIELD_MAX_LEN,
            fields: vec![
                HeaderField::ctime_timestamp(),
                HeaderField::software_version("P16."),
            ],
        }
    }
}

/// Plausible coordinate range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinateBounds {
    /// Exclusive lower bound.
    pub min: f64,
    /// Exclusive upper bound.
    pub max: f64,
    /// Values with `|v| <= epsilon` are rejected.
    pub epsilon: f64,
    /// Absolute limit applied in strict mode.
    pub strict_limit: f64,
}

impl Default for CoordinateBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_BOUND,
            max: DEFAULT_MAX_BOUND,
            epsilon: DEFAULT_EPSILON,
            strict_limit: DEFAULT_STRICT_LIMIT,
        }
    }
}

impl CoordinateBounds {
    /// Effective (min, max) after applying strict mode.
    pub fn range(&self, strict: bool) -> (f64, f64) {
        if strict {
            (
                self.min.max(-self.strict_limit),
                self.max.min(self.strict_limit),
            )
        } else {
            (self.min, self.max)
        }
    }

    /// Check a single value against the plausibility predicate.
    #[inline]
    pub fn accepts(&self, value: f64, strict: bool) -> bool {
        let (lo, hi) = self.range(strict);
        value.abs() > self.epsilon && value > lo && value < hi
    }
}

/// Coordinate scan alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Step 8 bytes at a time from the end of the header.
    #[default]
    Aligned,
    /// Step 1 byte after a rejected window.
    Fine,
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanMode::Aligned => write!(f, "aligned"),
            ScanMode::Fine => write!(f, "fine"),
        }
    }
}

/// Coordinate scanning settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinateConfig {
    pub bounds: CoordinateBounds,
    /// Tighten the bounds to `strict_limit`.
    pub strict: bool,
    pub mode: ScanMode,
    /// Collapse candidates whose windows overlap.
    pub dedup_overlaps: bool,
}

/// Tool reference extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Byte strings that mark a possible tool descriptor (case-sensitive).
    pub keywords: Vec<String>,
    /// A hit is kept only if its context contains one of these (case-insensitive).
    pub confirmations: Vec<String>,
    pub context_before: usize,
    pub context_after: usize,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            keywords: ["Punch", "punch", "PUNCH", "diameter", "cut", "base"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            confirmations: vec!["diameter".to_string()],
            context_before: DEFAULT_CONTEXT_BEFORE,
            context_after: DEFAULT_CONTEXT_AFTER,
        }
    }
}

/// Embedded string scanning settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringConfig {
    /// Runs must be strictly longer than this.
    pub min_len: usize,
    pub top_k: usize,
}

impl Default for StringConfig {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_STRING_LEN,
            top_k: DEFAULT_STRING_TOP_K,
        }
    }
}

/// Pattern frequency settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub min_occurrences: usize,
    pub top_k: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_occurrences: DEFAULT_PATTERN_MIN_OCCURRENCES,
            top_k: DEFAULT_PATTERN_TOP_K,
        }
    }
}

/// Complete probe configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub header: HeaderConfig,
    pub coordinates: CoordinateConfig,
    pub tools: ToolConfig,
    pub strings: StringConfig,
    pub patterns: PatternConfig,
}

impl ProbeConfig {
    /// Default configuration with strict coordinate bounds.
    pub fn strict() -> Self {
        let mut config = Self::default();
        config.coordinates.strict = true;
        config
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ProbeError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
