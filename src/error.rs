//! Error types for CIMEX probing.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for CIMEX processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// File not found (-1)
    FileNotFound = -1,
    /// Empty file (-2)
    EmptyFile = -2,
    /// Read past the end of the buffer (-3)
    OutOfBounds = -3,
    /// Buffer too short to hold a header (-4)
    InvalidHeader = -4,
    /// Read failure other than a missing file (-5)
    Io = -5,
    /// Configuration rejected (E100)
    InvalidConfig = 100,
    /// Scan cancelled by the caller (E200)
    Cancelled = 200,
}

/// Main error type for the probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Read of {width} byte(s) at offset {offset} exceeds buffer length {len}")]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },

    #[error("Invalid header: buffer holds {len} byte(s), at least {required} required")]
    InvalidHeader { len: usize, required: usize },

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Scan cancelled at offset {offset}")]
    Cancelled { offset: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ProbeError::FileNotFound { .. } => ErrorCode::FileNotFound,
            ProbeError::EmptyFile { .. } => ErrorCode::EmptyFile,
            ProbeError::OutOfBounds { .. } => ErrorCode::OutOfBounds,
            ProbeError::InvalidHeader { .. } => ErrorCode::InvalidHeader,
            ProbeError::Config { .. } => ErrorCode::InvalidConfig,
            ProbeError::Cancelled { .. } => ErrorCode::Cancelled,
            ProbeError::Io(_) => ErrorCode::Io,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        ProbeError::Config {
            message: err.to_string(),
        }
    }
}

/// Result type alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
