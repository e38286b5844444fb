//! Data model types for CIMEX probing.

mod candidate;
mod header;
mod record;
mod result;
mod span;

pub use candidate::{FieldCandidate, FieldKind, Value};
pub use header::{Header, HeaderFieldMatch};
pub use record::{CoordinatePoint, PatternCount, RankedString, ToolReference};
pub use result::{ParseResult, Statistics};
pub use span::ByteSpan;
