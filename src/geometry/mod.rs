//! Geometry aggregation over extracted coordinates.

mod bounds;

pub use bounds::{GeometryBounds, GeometrySummary};
