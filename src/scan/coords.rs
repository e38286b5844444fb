//! Sliding-window scan for little-endian f64 coordinate pairs.

use super::Scanner;
use crate::config::{CoordinateBounds, CoordinateConfig, ScanMode};
use crate::error::{ProbeError, Result};
use crate::model::{ByteSpan, FieldCandidate, FieldKind, Value};
use crate::reader::ByteReader;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Width of one encoded coordinate.
pub const VALUE_WIDTH: usize = 8;

/// Width of an encoded (x, y) pair.
pub const PAIR_WIDTH: usize = 2 * VALUE_WIDTH;

/// Scans for plausible (x, y) pairs.
#[derive(Debug, Clone, Default)]
pub struct CoordinateScanner {
    bounds: CoordinateBounds,
    strict: bool,
    mode: ScanMode,
    cancel: Option<Arc<AtomicBool>>,
}

impl CoordinateScanner {
    pub fn new(config: &CoordinateConfig) -> Self {
        Self {
            bounds: config.bounds,
            strict: config.strict,
            mode: config.mode,
            cancel: None,
        }
    }

    /// Check `flag` before every window; a raised flag aborts the scan.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Whether both values satisfy the plausibility predicate.
    pub fn is_plausible(&self, x: f64, y: f64) -> bool {
        self.bounds.accepts(x, self.strict) && self.bounds.accepts(y, self.strict)
    }

    /// 1.0 at the center of the plausible range, falling towards 0.0 at its edges.
    pub fn confidence(&self, x: f64, y: f64) -> f64 {
        let (lo, hi) = self.bounds.range(self.strict);
        let half = (hi - lo) / 2.0;
        if half <= 0.0 {
            return 0.0;
        }
        let center = lo + half;
        let dx = (x - center).abs() / half;
        let dy = (y - center).abs() / half;
        (1.0 - (dx + dy) / 2.0).clamp(0.0, 1.0)
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

impl Scanner for CoordinateScanner {
    fn name(&self) -> &'static str {
        "coordinates"
    }

    fn scan(&self, reader: &ByteReader<'_>, start: usize) -> Result<Vec<FieldCandidate>> {
        let mut candidates = Vec::new();
        let mut pos = start;

        // A pair ending exactly at the buffer end is not read.
        while pos + PAIR_WIDTH < reader.len() {
            if self.cancelled() {
                debug!("Coordinate scan cancelled at 0x{:06x}", pos);
                return Err(ProbeError::Cancelled { offset: pos });
            }

            let (Ok(x), Ok(y)) = (
                reader.read_f64_le(pos),
                reader.read_f64_le(pos + VALUE_WIDTH),
            ) else {
                break;
            };

            if self.is_plausible(x, y) {
                candidates.push(FieldCandidate::new(
                    ByteSpan::new(pos, PAIR_WIDTH),
                    FieldKind::CoordinatePair,
                    Value::Pair { x, y },
                    self.confidence(x, y),
                ));
                pos += VALUE_WIDTH;
            } else {
                pos += match self.mode {
                    ScanMode::Aligned => VALUE_WIDTH,
                    ScanMode::Fine => 1,
                };
            }
        }

        debug!(
            "{} scan ({}) from 0x{:06x}: {} candidate(s)",
            self.name(),
            self.mode,
            start,
            candidates.len()
        );
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn pair(x: f64, y: f64) -> Vec<u8> {
        let mut out = x.to_le_bytes().to_vec();
        out.extend_from_slice(&y.to_le_bytes());
        out
    }

    fn scanner(strict: bool, mode: ScanMode) -> CoordinateScanner {
        CoordinateScanner::new(&CoordinateConfig {
            strict,
            mode,
            ..Default::default()
        })
    }

    #[test]
    fn test_single_pair_between_padding() {
        let mut data = vec![0u8; 8];
        data.extend(pair(12.5, 25.0));
        data.extend(vec![0u8; 8]);
        let reader = ByteReader::new(&data);
        let found = scanner(false, ScanMode::Aligned).scan(&reader, 0).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span(), ByteSpan::new(8, 16));
        assert_eq!(found[0].value().as_pair(), Some((12.5, 25.0)));
        assert!((found[0].confidence() - 0.9625).abs() < EPS);
    }

    #[test]
    fn test_overlapping_windows_are_kept() {
        let mut data = pair(12.5, 25.0);
        data.extend(pair(40.0, 7.5));
        data.extend(vec![0u8; 8]);
        let reader = ByteReader::new(&data);
        let found = scanner(false, ScanMode::Aligned).scan(&reader, 0).unwrap();
        let offsets: Vec<_> = found.iter().map(|c| c.span().offset).collect();
        assert_eq!(offsets, vec![0, 8, 16]);
        assert_eq!(found[1].value().as_pair(), Some((25.0, 40.0)));
    }

    #[test]
    fn test_alignment_is_relative_to_start() {
        let mut data = vec![0u8; 3];
        data.extend(pair(-7.5, 40.0));
        data.extend(vec![0u8; 8]);
        let reader = ByteReader::new(&data);
        let found = scanner(false, ScanMode::Aligned).scan(&reader, 3).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span().offset, 3);
    }

    #[test]
    fn test_pair_ending_at_buffer_end_is_not_read() {
        let mut data = pair(1.0, 2.0);
        let reader = ByteReader::new(&data);
        for mode in [ScanMode::Aligned, ScanMode::Fine] {
            assert!(scanner(false, mode).scan(&reader, 0).unwrap().is_empty());
        }

        data.push(0);
        let reader = ByteReader::new(&data);
        let found = scanner(false, ScanMode::Aligned).scan(&reader, 0).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span(), ByteSpan::new(0, 16));
    }

    #[test]
    fn test_fine_scan_finds_misaligned_pair() {
        let mut data = vec![0u8; 3];
        data.extend(pair(12.5, 25.0));
        data.extend(vec![0u8; 8]);
        let reader = ByteReader::new(&data);

        let aligned = scanner(false, ScanMode::Aligned).scan(&reader, 0).unwrap();
        assert!(aligned.is_empty());

        let fine = scanner(false, ScanMode::Fine).scan(&reader, 0).unwrap();
        assert_eq!(fine.len(), 1);
        assert_eq!(fine[0].span().offset, 3);
    }

    #[test]
    fn test_strict_mode_rejects_large_values() {
        let mut data = pair(250.0, 30.0);
        data.extend(vec![0u8; 8]);
        let reader = ByteReader::new(&data);
        assert_eq!(
            scanner(false, ScanMode::Aligned).scan(&reader, 0).unwrap().len(),
            1
        );
        assert!(scanner(true, ScanMode::Aligned)
            .scan(&reader, 0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_rejects_noise() {
        let padding = [0u8; 8];
        let mut data = pair(f64::NAN, 1.0);
        data.extend(padding);
        data.extend(pair(1.0, f64::INFINITY));
        data.extend(padding);
        data.extend(pair(0.00001, 3.0));
        data.extend(padding);
        data.extend(pair(-600.0, 3.0));
        let reader = ByteReader::new(&data);
        let found = scanner(false, ScanMode::Aligned).scan(&reader, 0).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_short_or_empty_input() {
        let reader = ByteReader::new(&[0x40; 15]);
        assert!(scanner(false, ScanMode::Fine).scan(&reader, 0).unwrap().is_empty());
        let reader = ByteReader::new(&[]);
        assert!(scanner(false, ScanMode::Aligned).scan(&reader, 0).unwrap().is_empty());
        let reader = ByteReader::new(&[0; 32]);
        assert!(scanner(false, ScanMode::Aligned).scan(&reader, 100).unwrap().is_empty());
    }

    #[test]
    fn test_confidence_shape() {
        let s = scanner(false, ScanMode::Aligned);
        assert!((s.confidence(0.0, 0.0) - 1.0).abs() < EPS);
        assert!((s.confidence(250.0, -250.0) - 0.5).abs() < EPS);
        assert!(s.confidence(12.5, 25.0) > s.confidence(40.0, 25.0));

        let bounds = CoordinateBounds {
            min: 0.0,
            max: 100.0,
            ..Default::default()
        };
        let s = CoordinateScanner::new(&CoordinateConfig {
            bounds,
            ..Default::default()
        });
        assert!((s.confidence(50.0, 50.0) - 1.0).abs() < EPS);
        assert!((s.confidence(0.0, 100.0) - 0.0).abs() < EPS);
    }

    #[test]
    fn test_cancel_flag() {
        let mut data = pair(1.0, 2.0);
        data.extend(vec![0u8; 8]);
        let reader = ByteReader::new(&data);
        let flag = Arc::new(AtomicBool::new(true));
        let err = scanner(false, ScanMode::Aligned)
            .with_cancel(flag)
            .scan(&reader, 0)
            .unwrap_err();
        assert!(matches!(err, ProbeError::Cancelled { offset: 0 }));
    }
}
