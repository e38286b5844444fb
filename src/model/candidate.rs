//! Scanner output: annotated spans that may or may not be real fields.

use super::ByteSpan;
use serde::{Deserialize, Serialize};

/// What a candidate is believed to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Magic,
    Timestamp,
    VersionString,
    CoordinatePair,
    ToolReference,
    UnknownText,
}

/// Decoded value of a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    U32(u32),
    Text(String),
    Pair { x: f64, y: f64 },
}

impl Value {
    /// Text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coordinate payload, if any.
    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match self {
            Value::Pair { x, y } => Some((*x, *y)),
            _ => None,
        }
    }
}

/// A heuristically identified field. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCandidate {
    span: ByteSpan,
    kind: FieldKind,
    value: Value,
    confidence: f64,
}

impl FieldCandidate {
    /// Create a candidate. Confidence is clamped to `[0, 1]`; NaN becomes 0.
    pub fn new(span: ByteSpan, kind: FieldKind, value: Value, confidence: f64) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            span,
            kind,
            value,
            confidence,
        }
    }

    pub fn span(&self) -> ByteSpan {
        self.span
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_clamped() {
        let span = ByteSpan::new(0, 4);
        let c = FieldCandidate::new(span, FieldKind::Magic, Value::U32(1), 1.7);
        assert_eq!(c.confidence(), 1.0);
        let c = FieldCandidate::new(span, FieldKind::Magic, Value::U32(1), -0.2);
        assert_eq!(c.confidence(), 0.0);
        let c = FieldCandidate::new(span, FieldKind::Magic, Value::U32(1), f64::NAN);
        assert_eq!(c.confidence(), 0.0);
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Text("abc".into()).as_text(), Some("abc"));
        assert_eq!(Value::U32(3).as_text(), None);
        assert_eq!(Value::Pair { x: 1.0, y: 2.0 }.as_pair(), Some((1.0, 2.0)));
    }
}
