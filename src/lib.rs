//! cimex-probe - Heuristic decoder for undocumented CIMEX CAM/CNC binary files.
//!
//! The CIMEX layout is not documented, so decoding is split into a fixed part
//! (the little-endian magic at offset 0 and a table of text fields) and a
//! heuristic part that scans the rest of the buffer for plausible coordinate
//! pairs, embedded strings and tool descriptors. Every heuristic match carries
//! a confidence score and the byte span it came from.
//!
//! # Example
//!
//! ```no_run
//! use cimex_probe::{parse_cimex_file, ProbeConfig};
//! use std::path::Path;
//!
//! let config = ProbeConfig::strict();
//! let result = parse_cimex_file(Path::new("sample.cim"), &config).unwrap();
//! println!("magic {}", result.header.magic_hex());
//! if let Some(bounds) = result.bounds {
//!     println!("{} x {}", bounds.width, bounds.height);
//! }
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod parser;
pub mod reader;
pub mod scan;
pub mod validation;

// Re-exports for convenience
pub use config::{CoordinateBounds, HeaderField, HeaderRole, ProbeConfig, ScanMode, Terminator};
pub use error::{ErrorCode, ProbeError, Result};
pub use geometry::{GeometryBounds, GeometrySummary};
pub use model::{
    ByteSpan, CoordinatePoint, FieldCandidate, FieldKind, Header, ParseResult, ToolReference,
    Value,
};
pub use parser::{parse_cimex, parse_cimex_file, CimexParser};
pub use reader::ByteReader;
pub use validation::{assess_result, validate_config, ValidationResult};

/// Probe a CIMEX file and log reduced-confidence warnings.
///
/// This is the main high-level function:
/// 1. Validate the configuration
/// 2. Read and decode the file
/// 3. Assess the result and log its warnings
pub fn probe_file(input_path: &std::path::Path, config: &ProbeConfig) -> Result<ParseResult> {
    let validation = validate_config(config);
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }

    let result = parse_cimex_file(input_path, config)?;

    let assessment = assess_result(&result);
    for warning in &assessment.warnings {
        tracing::warn!("{}", warning);
    }

    Ok(result)
}
