//! Configuration checks and result confidence assessment.

use crate::config::{
    CoordinateConfig, HeaderConfig, ProbeConfig, Terminator, ToolConfig, MAGIC_LEN,
};
use crate::error::{ProbeError, Result};
use crate::model::ParseResult;

/// Mean coordinate confidence below which a result is flagged.
pub const LOW_CONFIDENCE: f64 = 0.5;

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate a probe configuration, section by section.
pub fn validate_config(config: &ProbeConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();
    result.merge(validate_header(&config.header));
    result.merge(validate_coordinates(&config.coordinates));
    result.merge(validate_tools(&config.tools));
    result.merge(validate_report_limits(config));
    result
}

fn validate_header(header: &HeaderConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if header.header_len < MAGIC_LEN {
        result.add_error(format!(
            "Header length {} is shorter than the {}-byte magic",
            header.header_len, MAGIC_LEN
        ));
    }
    if header.max_field_len == 0 {
        result.add_warning("Header field length cap is 0; all header fields will be empty");
    }
    for (idx, field) in header.fields.iter().enumerate() {
        if field.label.trim().is_empty() {
            result.add_error(format!("Header field {}: Empty label", idx + 1));
        }
        if field.patterns.iter().all(|p| p.is_empty()) {
            result.add_error(format!(
                "Header field '{}': No non-empty search pattern",
                field.label
            ));
        }
        if matches!(&field.terminator, Terminator::Pattern(p) if p.is_empty()) {
            result.add_error(format!("Header field '{}': Empty terminator", field.label));
        }
    }

    result
}

fn validate_coordinates(coordinates: &CoordinateConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let bounds = &coordinates.bounds;

    if bounds.epsilon.is_nan() || bounds.epsilon < 0.0 {
        result.add_error(format!("Invalid epsilon {}", bounds.epsilon));
    }
    let (lo, hi) = bounds.range(coordinates.strict);
    if lo.is_nan() || hi.is_nan() || lo >= hi {
        result.add_error(format!("Empty coordinate range ({}, {})", lo, hi));
    }
    if coordinates.strict && (bounds.strict_limit.is_nan() || bounds.strict_limit <= 0.0) {
        result.add_error(format!("Invalid strict limit {}", bounds.strict_limit));
    }

    result
}

fn validate_tools(tools: &ToolConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if tools.keywords.iter().any(|k| k.is_empty()) {
        result.add_warning("Empty tool keyword will be ignored");
    }
    if !tools.keywords.is_empty() && tools.confirmations.iter().all(|c| c.is_empty()) {
        result.add_warning("No confirmation terms; no tool reference can be confirmed");
    }

    result
}

fn validate_report_limits(config: &ProbeConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if config.strings.top_k == 0 {
        result.add_warning("String top-K is 0; no strings will be reported");
    }
    if config.patterns.top_k == 0 {
        result.add_warning("Pattern top-K is 0; no patterns will be reported");
    }

    result
}

/// Quick validation used before parsing.
pub fn quick_validate(config: &ProbeConfig) -> Result<()> {
    let result = validate_config(config);

    if !result.passed {
        return Err(ProbeError::Config {
            message: result.errors.join("; "),
        });
    }

    Ok(())
}

/// Flag the ways a parse result carries reduced confidence. Never fails.
pub fn assess_result(parsed: &ParseResult) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if parsed.header.timestamp.is_none() {
        result.add_warning("No timestamp found in header");
    }
    if parsed.header.software_version.is_none() {
        result.add_warning("No software version found in header");
    }

    match parsed.mean_coordinate_confidence() {
        None => result.add_warning("No plausible coordinates found"),
        Some(mean) if mean < LOW_CONFIDENCE => result.add_warning(format!(
            "Low mean coordinate confidence {:.3} over {} point(s)",
            mean,
            parsed.coordinates.len()
        )),
        Some(_) => {}
    }

    result
}
