//! Main CIMEX probe: runs the full decode pipeline over one buffer.

use crate::config::ProbeConfig;
use crate::error::{ProbeError, Result};
use crate::geometry::{GeometryBounds, GeometrySummary};
use crate::model::{ParseResult, Statistics};
use crate::reader::ByteReader;
use crate::scan::{
    pattern_frequency, rank_strings, CoordinateScanner, KeywordScanner, Scanner, StringScanner,
};
use crate::validation::quick_validate;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{debug, info};

use super::extract::{extract_coordinates, extract_tools};
use super::header::decode_header;

/// CIMEX file parser.
#[derive(Debug, Clone, Default)]
pub struct CimexParser {
    config: ProbeConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl CimexParser {
    /// Create a parser, rejecting an invalid configuration.
    pub fn new(config: ProbeConfig) -> Result<Self> {
        quick_validate(&config)?;
        Ok(Self {
            config,
            cancel: None,
        })
    }

    /// Abort the coordinate scan when `flag` is raised.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Decode one buffer. Pure: the same bytes and configuration give the same result.
    pub fn parse(&self, data: &[u8]) -> Result<ParseResult> {
        let header_len = self.config.header.header_len;
        if data.len() < header_len {
            return Err(ProbeError::InvalidHeader {
                len: data.len(),
                required: header_len,
            });
        }

        let reader = ByteReader::new(data);

        // Header
        let decoded = decode_header(&reader, &self.config.header)?;
        debug!(
            "Header: magic {}, {} field(s) present",
            decoded.header.magic_hex(),
            decoded.header.fields.len()
        );

        // Coordinates
        let mut coord_scanner = CoordinateScanner::new(&self.config.coordinates);
        if let Some(flag) = &self.cancel {
            coord_scanner = coord_scanner.with_cancel(Arc::clone(flag));
        }
        let coord_candidates = coord_scanner.scan(&reader, header_len)?;
        let coordinates = extract_coordinates(
            &coord_candidates,
            header_len,
            self.config.coordinates.dedup_overlaps,
        );

        // Tools
        let tool_hits = KeywordScanner::new(&self.config.tools).scan(&reader, 0)?;
        let tools = extract_tools(&reader, &tool_hits, &self.config.tools);

        // Diagnostics
        let string_candidates = StringScanner::new(&self.config.strings).scan(&reader, 0)?;
        let (strings, distinct_strings) =
            rank_strings(&string_candidates, self.config.strings.top_k);
        let patterns = pattern_frequency(data, &self.config.patterns);

        // Geometry
        let bounds = GeometryBounds::from_points(&coordinates);
        let summary = GeometrySummary::from_points(&coordinates);

        let statistics = Statistics {
            file_size: data.len(),
            coordinate_candidates: coord_candidates.len(),
            total_coordinates: coordinates.len(),
            tool_count: tools.len(),
            string_candidates: distinct_strings,
        };
        info!(
            "Decoded {} coordinate(s), {} tool reference(s), {} string(s) from {} bytes",
            statistics.total_coordinates,
            statistics.tool_count,
            statistics.string_candidates,
            statistics.file_size
        );

        Ok(ParseResult {
            header: decoded.header,
            coordinates,
            tools,
            bounds,
            summary,
            strings,
            patterns,
            statistics,
        })
    }
}

/// Decode a buffer with the given configuration.
pub fn parse_cimex(data: &[u8], config: &ProbeConfig) -> Result<ParseResult> {
    CimexParser::new(config.clone())?.parse(data)
}

/// Read and decode a CIMEX file.
pub fn parse_cimex_file(path: &Path, config: &ProbeConfig) -> Result<ParseResult> {
    if !path.exists() {
        return Err(ProbeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let data = std::fs::read(path)?;
    if data.is_empty() {
        return Err(ProbeError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    debug!("Read {} bytes from {}", data.len(), path.display());
    parse_cimex(&data, config)
}
