//! Final parse output.

use super::{CoordinatePoint, Header, PatternCount, RankedString, ToolReference};
use crate::geometry::{GeometryBounds, GeometrySummary};
use serde::{Deserialize, Serialize};

/// Counters describing a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub file_size: usize,
    /// Coordinate candidates before dedup.
    pub coordinate_candidates: usize,
    /// Coordinates kept in the result.
    pub total_coordinates: usize,
    pub tool_count: usize,
    /// Distinct strings before the top-K cut.
    pub string_candidates: usize,
}

/// Everything decoded from one buffer. Owned by the caller, never mutated by the probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub header: Header,
    /// Ascending by source offset.
    pub coordinates: Vec<CoordinatePoint>,
    /// Ascending by hit offset.
    pub tools: Vec<ToolReference>,
    pub bounds: Option<GeometryBounds>,
    pub summary: Option<GeometrySummary>,
    pub strings: Vec<RankedString>,
    pub patterns: Vec<PatternCount>,
    pub statistics: Statistics,
}

impl ParseResult {
    /// Mean confidence over the kept coordinates.
    pub fn mean_coordinate_confidence(&self) -> Option<f64> {
        if self.coordinates.is_empty() {
            return None;
        }
        let sum: f64 = self.coordinates.iter().map(|p| p.confidence).sum();
        Some(sum / self.coordinates.len() as f64)
    }
}
