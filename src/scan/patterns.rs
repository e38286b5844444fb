//! Fixed-width byte pattern frequency, for spotting structural repetition.

use crate::config::{PatternConfig, PATTERN_WIDTH};
use crate::model::PatternCount;
use std::collections::HashMap;

/// Count non-overlapping 4-byte windows and report the most frequent ones.
///
/// A trailing partial window is ignored. Patterns seen fewer than
/// `min_occurrences` times are dropped; the rest are sorted by count
/// (descending) then first-seen offset and cut to `top_k`.
pub fn pattern_frequency(data: &[u8], config: &PatternConfig) -> Vec<PatternCount> {
    let mut counts: HashMap<&[u8], (usize, usize)> = HashMap::new();

    for (i, window) in data.chunks_exact(PATTERN_WIDTH).enumerate() {
        counts
            .entry(window)
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, i * PATTERN_WIDTH));
    }

    let mut patterns: Vec<PatternCount> = counts
        .into_iter()
        .filter(|(_, (count, _))| *count >= config.min_occurrences)
        .map(|(bytes, (count, first_offset))| PatternCount {
            bytes: bytes.to_vec(),
            count,
            first_offset,
        })
        .collect();

    patterns.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.first_offset.cmp(&b.first_offset))
    });
    patterns.truncate(config.top_k);
    patterns
}
