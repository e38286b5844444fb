//! Heuristic field scanners.
//!
//! Scanners classify byte windows as plausible fields and emit
//! [`FieldCandidate`]s with a confidence score. They never fail on malformed
//! input: a read past the end of the buffer ends the scan.

mod coords;
mod keywords;
mod patterns;
mod strings;

pub use coords::{CoordinateScanner, PAIR_WIDTH, VALUE_WIDTH};
pub use keywords::{KeywordScanner, UNCONFIRMED_CONFIDENCE};
pub use patterns::pattern_frequency;
pub use strings::{rank_strings, StringScanner};

use crate::error::Result;
use crate::model::FieldCandidate;
use crate::reader::ByteReader;

/// A strategy that scans `[start, reader.len())` for candidates.
pub trait Scanner {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Candidates in ascending offset order. Only cancellation is an error.
    fn scan(&self, reader: &ByteReader<'_>, start: usize) -> Result<Vec<FieldCandidate>>;
}
