//! Turns scanner candidates into typed records.

use crate::config::{ScanMode, ToolConfig};
use crate::model::{ByteSpan, CoordinatePoint, FieldCandidate, FieldKind, ToolReference};
use crate::reader::{decode_permissive, ByteReader};
use crate::scan::VALUE_WIDTH;
use std::cmp::Ordering;
use tracing::debug;

/// Build coordinate points from candidates, in ascending offset order.
///
/// `scan_start` is the offset the coordinate scan began at; it decides whether
/// a point sits on the aligned grid. With `dedup_overlaps`, intersecting
/// candidates are collapsed to the most confident one (earlier offset on ties).
pub fn extract_coordinates(
    candidates: &[FieldCandidate],
    scan_start: usize,
    dedup_overlaps: bool,
) -> Vec<CoordinatePoint> {
    let pairs: Vec<&FieldCandidate> = candidates
        .iter()
        .filter(|c| c.kind() == FieldKind::CoordinatePair)
        .collect();

    let kept = if dedup_overlaps {
        let kept = collapse_overlaps(&pairs);
        debug!(
            "Overlap dedup kept {} of {} coordinate candidate(s)",
            kept.len(),
            pairs.len()
        );
        kept
    } else {
        pairs
    };

    kept.into_iter()
        .filter_map(|c| {
            let (x, y) = c.value().as_pair()?;
            let span = c.span();
            let method = if span.offset.saturating_sub(scan_start) % VALUE_WIDTH == 0 {
                ScanMode::Aligned
            } else {
                ScanMode::Fine
            };
            Some(CoordinatePoint::new(x, y, span, c.confidence(), method))
        })
        .collect()
}

/// Keep a set of pairwise non-intersecting candidates, preferring confidence.
fn collapse_overlaps<'a>(pairs: &[&'a FieldCandidate]) -> Vec<&'a FieldCandidate> {
    let mut by_rank = pairs.to_vec();
    by_rank.sort_by(|a, b| {
        b.confidence()
            .partial_cmp(&a.confidence())
            .unwrap_or(Ordering::Equal)
            .then(a.span().offset.cmp(&b.span().offset))
    });

    let mut kept: Vec<&FieldCandidate> = Vec::with_capacity(by_rank.len());
    for candidate in by_rank {
        let span = candidate.span();
        if kept.iter().all(|k| !k.span().intersects(&span)) {
            kept.push(candidate);
        }
    }

    kept.sort_by_key(|c| c.span().offset);
    kept
}

/// Confirm keyword hits as tool references, keeping candidate order.
///
/// Every `ToolReference` candidate yields a context window of `context_before`
/// bytes before the hit and `context_after` bytes from its start. The hit is
/// kept only if that context contains a confirmation term (case-insensitive).
pub fn extract_tools(
    reader: &ByteReader<'_>,
    candidates: &[FieldCandidate],
    config: &ToolConfig,
) -> Vec<ToolReference> {
    let confirmations: Vec<String> = config
        .confirmations
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| c.to_lowercase())
        .collect();

    let mut tools = Vec::new();
    let mut rejected = 0usize;

    for candidate in candidates
        .iter()
        .filter(|c| c.kind() == FieldKind::ToolReference)
    {
        let Some(keyword) = candidate.value().as_text() else {
            continue;
        };
        let hit = candidate.span().offset;
        let span = ByteSpan::from_range(
            hit.saturating_sub(config.context_before),
            hit.saturating_add(config.context_after).min(reader.len()),
        );
        let Ok(bytes) = reader.slice(span) else {
            continue;
        };
        let context = decode_permissive(bytes);
        let lowered = context.to_lowercase();

        match confirmations.iter().find(|c| lowered.contains(c.as_str())) {
            Some(confirmation) => tools.push(ToolReference {
                raw_context: context.trim().to_string(),
                source_span: span,
                keyword: keyword.to_string(),
                hit_offset: hit,
                confirmation: confirmation.clone(),
            }),
            None => rejected += 1,
        }
    }

    debug!(
        "Tool extraction: {} confirmed, {} unconfirmed keyword hit(s)",
        tools.len(),
        rejected
    );
    tools
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;
    use crate::scan::{KeywordScanner, Scanner};
    use pretty_assertions::assert_eq;

    fn pair(offset: usize, x: f64, y: f64, confidence: f64) -> FieldCandidate {
        FieldCandidate::new(
            ByteSpan::new(offset, 16),
            FieldKind::CoordinatePair,
            Value::Pair { x, y },
            confidence,
        )
    }

    fn offsets(points: &[CoordinatePoint]) -> Vec<usize> {
        points.iter().map(|p| p.source_span.offset).collect()
    }

    #[test]
    fn test_verbatim_without_dedup() {
        let candidates = vec![pair(100, 1.0, 2.0, 0.9), pair(108, 2.0, 3.0, 0.95)];
        let points = extract_coordinates(&candidates, 100, false);
        assert_eq!(offsets(&points), vec![100, 108]);
        assert_eq!(points[1].confidence, 0.95);
        assert_eq!(points[0].method, ScanMode::Aligned);
    }

    #[test]
    fn test_dedup_keeps_higher_confidence() {
        let candidates = vec![
            pair(100, 12.5, 25.0, 0.9625),
            pair(108, 25.0, 40.0, 0.935),
            pair(116, 40.0, 7.5, 0.9525),
        ];
        let points = extract_coordinates(&candidates, 100, true);
        assert_eq!(offsets(&points), vec![100, 116]);
    }

    #[test]
    fn test_dedup_middle_wins() {
        let candidates = vec![
            pair(0, 1.0, 1.0, 0.5),
            pair(8, 1.0, 1.0, 0.9),
            pair(16, 1.0, 1.0, 0.5),
        ];
        let points = extract_coordinates(&candidates, 0, true);
        assert_eq!(offsets(&points), vec![8]);
    }

    #[test]
    fn test_dedup_tie_prefers_earlier() {
        let candidates = vec![pair(0, 10.0, 20.0, 0.97), pair(8, 20.0, 10.0, 0.97)];
        let points = extract_coordinates(&candidates, 0, true);
        assert_eq!(offsets(&points), vec![0]);
    }

    #[test]
    fn test_fine_method_marked() {
        let candidates = vec![pair(103, 1.0, 2.0, 0.9)];
        let points = extract_coordinates(&candidates, 100, false);
        assert_eq!(points[0].method, ScanMode::Fine);
    }

    #[test]
    fn test_other_kinds_ignored() {
        let candidates = vec![FieldCandidate::new(
            ByteSpan::new(0, 5),
            FieldKind::UnknownText,
            Value::Text("PUNCH".into()),
            0.5,
        )];
        assert!(extract_coordinates(&candidates, 0, false).is_empty());
    }

    fn run_tools(data: &[u8], config: &ToolConfig) -> Vec<ToolReference> {
        let reader = ByteReader::new(data);
        let hits = KeywordScanner::new(config).scan(&reader, 0).unwrap();
        extract_tools(&reader, &hits, config)
    }

    fn tools(data: &[u8], keywords: &[&str]) -> Vec<ToolReference> {
        let config = ToolConfig {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        run_tools(data, &config)
    }

    #[test]
    fn test_keyword_without_confirmation() {
        let data = b"\x00\x00cut along the outer edge\x00\x00";
        assert!(tools(data, &["cut"]).is_empty());
    }

    #[test]
    fn test_keyword_with_confirmation() {
        let data = b"\x01\x02Round Punch Diameter 5.0\x00\x03";
        let found = tools(data, &["Punch"]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].keyword, "Punch");
        assert_eq!(found[0].hit_offset, 8);
        assert_eq!(found[0].confirmation, "diameter");
        assert_eq!(found[0].source_span, ByteSpan::new(0, data.len()));
        assert!(found[0].raw_context.contains("Round Punch Diameter 5.0"));
    }

    #[test]
    fn test_context_window_limits_confirmation() {
        let mut data = b"cut".to_vec();
        data.extend(vec![b'.'; 200]);
        data.extend_from_slice(b"diameter");
        let found = tools(&data, &["cut"]);
        assert!(found.is_empty());

        let config = ToolConfig {
            keywords: vec!["cut".into()],
            context_after: 300,
            ..Default::default()
        };
        assert_eq!(run_tools(&data, &config).len(), 1);
    }

    #[test]
    fn test_multiple_hits_ordered_by_offset() {
        let data = b"diameter 3 PUNCH ... punch diameter 4";
        let found = tools(data, &["punch", "PUNCH", "diameter"]);
        let hits: Vec<_> = found
            .iter()
            .map(|t| (t.hit_offset, t.keyword.as_str()))
            .collect();
        assert_eq!(
            hits,
            vec![
                (0, "diameter"),
                (11, "PUNCH"),
                (21, "punch"),
                (27, "diameter")
            ]
        );
    }

    #[test]
    fn test_empty_keyword_and_confirmation_ignored() {
        let config = ToolConfig {
            keywords: vec![String::new()],
            confirmations: vec![String::new()],
            ..Default::default()
        };
        assert!(run_tools(b"anything", &config).is_empty());
    }

    #[test]
    fn test_only_tool_candidates_are_confirmed() {
        let data = b"\x00Punch diameter 2.0\x00";
        let candidates = vec![FieldCandidate::new(
            ByteSpan::new(1, 5),
            FieldKind::UnknownText,
            Value::Text("Punch".into()),
            0.5,
        )];
        let reader = ByteReader::new(data);
        assert!(extract_tools(&reader, &candidates, &ToolConfig::default()).is_empty());
    }
}
