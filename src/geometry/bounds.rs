//! Bounding box and path summary over extracted coordinates.

use crate::model::CoordinatePoint;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds of a non-empty point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl GeometryBounds {
    /// Bounds of `points`, or `None` when there are none.
    pub fn from_points(points: &[CoordinatePoint]) -> Option<Self> {
        let first = points.first()?;
        let mut b = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
            width: 0.0,
            height: 0.0,
        };
        for p in &points[1..] {
            b.min_x = b.min_x.min(p.x);
            b.max_x = b.max_x.max(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_y = b.max_y.max(p.y);
        }
        b.width = b.max_x - b.min_x;
        b.height = b.max_y - b.min_y;
        Some(b)
    }
}

/// Point and path statistics for a non-empty point sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometrySummary {
    pub point_count: usize,
    /// Points with a distinct (x, y) value.
    pub distinct_points: usize,
    pub centroid_x: f64,
    pub centroid_y: f64,
    /// Length of the polyline through the points in scan order.
    pub path_length: f64,
}

impl GeometrySummary {
    /// Summary of `points`, or `None` when there are none.
    pub fn from_points(points: &[CoordinatePoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let centroid_x = points.iter().map(|p| p.x).sum::<f64>() / n;
        let centroid_y = points.iter().map(|p| p.y).sum::<f64>() / n;
        let path_length = points
            .windows(2)
            .map(|w| (w[1].x - w[0].x).hypot(w[1].y - w[0].y))
            .sum();

        let mut keys: Vec<(u64, u64)> = points
            .iter()
            .map(|p| (p.x.to_bits(), p.y.to_bits()))
            .collect();
        keys.sort_unstable();
        keys.dedup();

        Some(Self {
            point_count: points.len(),
            distinct_points: keys.len(),
            centroid_x,
            centroid_y,
            path_length,
        })
    }
}
