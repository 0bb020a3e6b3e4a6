//! Error handling primitives shared across the core.
//!
//! Every failure maps onto a stable [`BenchCode`], which doubles as the
//! process exit status of the `fairbench` binary.

use std::path::PathBuf;

use crate::data::schema::SchemaError;
use crate::evaluation::confusion::InconsistentTotalError;

/// Stable error codes surfaced as process exit statuses.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BenchCode {
    /// Success code used as a sentinel.
    Ok = 0,
    /// Bad command-line input.
    Usage = 2,
    /// Unreadable input or unwritable output path.
    Io = 3,
    /// Input table is not well-formed delimited text.
    InvalidInput = 4,
    /// Submitted data violates the declared schema.
    Schema = 5,
    /// Too many ids failed to match between submission and reference.
    Join = 6,
    /// Catch-all for defects; never expected on valid input.
    Internal = 70,
}

impl BenchCode {
    /// Exit status for this code.
    pub fn exit_status(self) -> u8 {
        self as u8
    }
}

/// Canonical error type for the core.
#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    /// Invalid run configuration.
    #[error("usage error: {0}")]
    Usage(String),

    /// A file could not be read, created or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited text could not be parsed into rows.
    #[error("submitted data file {} is not in a valid format: {message}", path.display())]
    Table { path: PathBuf, message: String },

    /// Column presence, typing or domain checks failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Unmatched ids between submission and reference exceed the allowed limit.
    #[error("{dropped} ids did not match between submission and reference (allowed: {allowed})")]
    TooManyUnmatched { dropped: usize, allowed: usize },

    /// Confusion counts failed their internal consistency check.
    #[error(transparent)]
    Inconsistent(#[from] InconsistentTotalError),

    /// Output serialisation failed.
    #[error("json serialisation failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type BenchResult<T> = Result<T, BenchError>;

impl BenchError {
    /// Machine readable code for this error.
    pub fn code(&self) -> BenchCode {
        match self {
            BenchError::Usage(_) => BenchCode::Usage,
            BenchError::Io { .. } => BenchCode::Io,
            BenchError::Table { .. } => BenchCode::InvalidInput,
            BenchError::Schema(_) => BenchCode::Schema,
            BenchError::TooManyUnmatched { .. } => BenchCode::Join,
            BenchError::Inconsistent(_) | BenchError::Json(_) => BenchCode::Internal,
        }
    }

    /// Usage helper.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// IO helper carrying the offending path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Malformed table helper.
    pub fn table(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Table {
            path: path.into(),
            message: message.into(),
        }
    }
}
