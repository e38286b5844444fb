//! Printable ASCII run extraction and ranking.

use super::Scanner;
use crate::config::StringConfig;
use crate::error::Result;
use crate::model::{ByteSpan, FieldCandidate, FieldKind, RankedString, Value};
use crate::reader::ByteReader;
use std::collections::HashMap;
use tracing::debug;

#[inline]
fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

/// Emits every printable run strictly longer than `min_len`.
#[derive(Debug, Clone)]
pub struct StringScanner {
    min_len: usize,
}

impl StringScanner {
    pub fn new(config: &StringConfig) -> Self {
        Self {
            min_len: config.min_len,
        }
    }

    /// Longer runs are less likely to be incidental byte noise.
    fn confidence(&self, len: usize) -> f64 {
        len as f64 / (len + self.min_len.max(1)) as f64
    }

    fn candidate(&self, data: &[u8], start: usize, end: usize) -> Option<FieldCandidate> {
        let len = end - start;
        if len <= self.min_len {
            return None;
        }
        // Printable ASCII is always valid UTF-8.
        let text = String::from_utf8_lossy(&data[start..end]).into_owned();
        Some(FieldCandidate::new(
            ByteSpan::new(start, len),
            FieldKind::UnknownText,
            Value::Text(text),
            self.confidence(len),
        ))
    }
}

impl Scanner for StringScanner {
    fn name(&self) -> &'static str {
        "strings"
    }

    fn scan(&self, reader: &ByteReader<'_>, start: usize) -> Result<Vec<FieldCandidate>> {
        let data = reader.as_bytes();
        let mut candidates = Vec::new();
        let mut run_start: Option<usize> = None;

        for (i, &byte) in data.iter().enumerate().skip(start) {
            match (is_printable(byte), run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(s)) => {
                    candidates.extend(self.candidate(data, s, i));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = run_start {
            candidates.extend(self.candidate(data, s, data.len()));
        }

        debug!("{} scan: {} run(s)", self.name(), candidates.len());
        Ok(candidates)
    }
}

/// Deduplicate text candidates by content and rank them.
///
/// Ranking is by descending length, ties broken by first-seen offset. Returns
/// the top `top_k` entries and the number of distinct strings.
pub fn rank_strings(candidates: &[FieldCandidate], top_k: usize) -> (Vec<RankedString>, usize) {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<RankedString> = Vec::new();

    for candidate in candidates {
        let Some(text) = candidate.value().as_text() else {
            continue;
        };
        match index.get(text) {
            Some(&i) => ranked[i].occurrences += 1,
            None => {
                index.insert(text, ranked.len());
                ranked.push(RankedString {
                    text: text.to_string(),
                    span: candidate.span(),
                    occurrences: 1,
                    confidence: candidate.confidence(),
                });
            }
        }
    }

    let distinct = ranked.len();
    ranked.sort_by(|a, b| {
        b.text
            .len()
            .cmp(&a.text.len())
            .then(a.span.offset.cmp(&b.span.offset))
    });
    ranked.truncate(top_k);
    (ranked, distinct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(data: &[u8]) -> Vec<FieldCandidate> {
        StringScanner::new(&StringConfig::default())
            .scan(&ByteReader::new(data), 0)
            .unwrap()
    }

    #[test]
    fn test_punch_between_binary() {
        let data = [0x00, 0x01, b'P', b'U', b'N', b'C', b'H', 0xff, 0x02];
        let found = scan(&data);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span(), ByteSpan::new(2, 5));
        assert_eq!(found[0].value().as_text(), Some("PUNCH"));
    }

    #[test]
    fn test_short_runs_excluded() {
        let data = b"\x00abc\x00abcd\x00abcde\x00";
        let texts: Vec<_> = scan(data)
            .iter()
            .map(|c| c.value().as_text().unwrap().to_string())
            .collect();
        assert_eq!(texts, vec!["abcde".to_string()]);
    }

    #[test]
    fn test_run_at_end_of_buffer() {
        let found = scan(b"\x00\x00trailing");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span(), ByteSpan::new(2, 8));
    }

    #[test]
    fn test_tab_and_newline_break_runs() {
        let found = scan(b"hello\tworld\nagain");
        let texts: Vec<_> = found
            .iter()
            .map(|c| c.value().as_text().unwrap())
            .collect();
        assert_eq!(texts, vec!["hello", "world", "again"]);
    }

    #[test]
    fn test_scan_from_offset() {
        let found = StringScanner::new(&StringConfig::default())
            .scan(&ByteReader::new(b"skipped\x00kept!"), 8)
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value().as_text(), Some("kept!"));
    }

    #[test]
    fn test_rank_dedup_and_order() {
        let data = b"\x00gamma\x00alpha\x00longest one\x00gamma\x00delta\x00";
        let (ranked, distinct) = rank_strings(&scan(data), 10);
        assert_eq!(distinct, 4);
        let texts: Vec<_> = ranked.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["longest one", "gamma", "alpha", "delta"]);
        assert_eq!(ranked[1].occurrences, 2);
        assert_eq!(ranked[1].span.offset, 1);
    }

    #[test]
    fn test_rank_top_k() {
        let data = b"\x00aaaaa\x00bbbbbb\x00ccccccc\x00";
        let (ranked, distinct) = rank_strings(&scan(data), 2);
        assert_eq!(distinct, 3);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].text, "ccccccc");
    }

    #[test]
    fn test_confidence_grows_with_length() {
        let found = scan(b"\x00abcde\x00abcdefghijkl\x00");
        assert!(found[1].confidence() > found[0].confidence());
        assert!(found[1].confidence() < 1.0);
    }
}
