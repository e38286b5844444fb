//! Raw tool keyword hits.

use super::Scanner;
use crate::config::ToolConfig;
use crate::error::Result;
use crate::model::{ByteSpan, FieldCandidate, FieldKind, Value};
use crate::reader::ByteReader;
use tracing::debug;

/// Confidence of a keyword hit before its context is checked.
pub const UNCONFIRMED_CONFIDENCE: f64 = 0.5;

/// Emits one `ToolReference` candidate per keyword occurrence.
///
/// Candidates are ordered by offset, then by keyword order in the configuration.
#[derive(Debug, Clone)]
pub struct KeywordScanner {
    keywords: Vec<String>,
}

impl KeywordScanner {
    pub fn new(config: &ToolConfig) -> Self {
        Self {
            keywords: config.keywords.clone(),
        }
    }
}

impl Scanner for KeywordScanner {
    fn name(&self) -> &'static str {
        "keywords"
    }

    fn scan(&self, reader: &ByteReader<'_>, start: usize) -> Result<Vec<FieldCandidate>> {
        let mut candidates = Vec::new();

        for keyword in &self.keywords {
            let mut from = start;
            while let Some(hit) = reader.find_ascii(keyword, from) {
                from = hit + keyword.len();
                candidates.push(FieldCandidate::new(
                    ByteSpan::new(hit, keyword.len()),
                    FieldKind::ToolReference,
                    Value::Text(keyword.clone()),
                    UNCONFIRMED_CONFIDENCE,
                ));
            }
        }

        // Stable: equal offsets keep keyword order.
        candidates.sort_by_key(|c| c.span().offset);
        debug!("{} scan: {} hit(s)", self.name(), candidates.len());
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(data: &[u8], keywords: &[&str]) -> Vec<(usize, String)> {
        let config = ToolConfig {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        KeywordScanner::new(&config)
            .scan(&ByteReader::new(data), 0)
            .unwrap()
            .into_iter()
            .map(|c| {
                assert_eq!(c.kind(), FieldKind::ToolReference);
                (c.span().offset, c.value().as_text().unwrap_or_default().to_string())
            })
            .collect()
    }

    #[test]
    fn test_hits_ordered_by_offset_then_keyword() {
        let hits = scan(b"cut base cut", &["base", "cut", "cu"]);
        assert_eq!(
            hits,
            vec![
                (0, "cut".to_string()),
                (0, "cu".to_string()),
                (4, "base".to_string()),
                (9, "cut".to_string()),
                (9, "cu".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_keyword_yields_nothing() {
        assert!(scan(b"anything", &[""]).is_empty());
    }

    #[test]
    fn test_hit_span_and_confidence() {
        let config = ToolConfig {
            keywords: vec!["PUNCH".into()],
            ..Default::default()
        };
        let found = KeywordScanner::new(&config)
            .scan(&ByteReader::new(b"\x00\x01PUNCH\x00"), 0)
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span(), ByteSpan::new(2, 5));
        assert_eq!(found[0].confidence(), UNCONFIRMED_CONFIDENCE);
    }
}
