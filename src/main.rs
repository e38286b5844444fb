//! cimex-probe - CLI tool to decode CIMEX files into a typed report.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cimex_probe::{probe_file, ParseResult, ProbeConfig, ScanMode};

/// Decode CIMEX CAM/CNC files with heuristic field scanning.
#[derive(Parser, Debug)]
#[command(name = "cimex-probe")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input CIMEX file path
    #[arg(short, long)]
    input: PathBuf,

    /// JSON configuration file (defaults are used for missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the JSON report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Tighten coordinate bounds to the strict limit
    #[arg(long)]
    strict: bool,

    /// Byte-by-byte scan for misaligned coordinates
    #[arg(long)]
    fine_scan: bool,

    /// Collapse overlapping coordinate candidates
    #[arg(long)]
    dedup: bool,

    /// Print the JSON report to stdout
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = match &args.config {
        Some(path) => ProbeConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ProbeConfig::default(),
    };
    if args.strict {
        config.coordinates.strict = true;
    }
    if args.fine_scan {
        config.coordinates.mode = ScanMode::Fine;
    }
    if args.dedup {
        config.coordinates.dedup_overlaps = true;
    }

    info!("Processing: {}", args.input.display());

    let result = probe_file(&args.input, &config)
        .with_context(|| format!("Failed to decode {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        log_summary(&result);
    }

    if let Some(output_path) = &args.output {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        info!("Report written: {}", output_path.display());
    }

    Ok(())
}

/// Plain-text summary of a decode.
fn log_summary(result: &ParseResult) {
    let header = &result.header;
    info!("Magic: {} ({})", header.magic_hex(), header.magic);
    info!(
        "Timestamp: {}",
        header.timestamp.as_deref().unwrap_or("Unknown")
    );
    info!(
        "Software: {}",
        header.software_version.as_deref().unwrap_or("Unknown")
    );

    info!(
        "Coordinates: {} kept of {} candidate(s)",
        result.statistics.total_coordinates, result.statistics.coordinate_candidates
    );
    for (i, p) in result.coordinates.iter().take(25).enumerate() {
        info!(
            "{:4}  {:8.3}  {:8.3}  0x{:06x}  {:.3}",
            i + 1,
            p.x,
            p.y,
            p.source_span.offset,
            p.confidence
        );
    }

    match &result.bounds {
        Some(b) => {
            info!("X range: {:.3} to {:.3}", b.min_x, b.max_x);
            info!("Y range: {:.3} to {:.3}", b.min_y, b.max_y);
            info!("Size: {:.3} x {:.3}", b.width, b.height);
        }
        None => warn!("No geometry bounds"),
    }

    for pattern in &result.patterns {
        info!("Pattern {}: {} occurrence(s)", pattern.hex(), pattern.count);
    }
    for s in &result.strings {
        info!("String '{}' at 0x{:06x}", s.text, s.span.offset);
    }
    for tool in &result.tools {
        info!(
            "Tool '{}' at 0x{:06x}: {}",
            tool.keyword, tool.hit_offset, tool.raw_context
        );
    }
}
