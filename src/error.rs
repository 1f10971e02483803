//! Error types for the aggregation engine.
//!
//! The library reports typed errors so callers can tell a skippable file
//! apart from a configuration problem that must stop a scan. The command
//! layer wraps these in `anyhow` with context.

use std::path::PathBuf;

/// A byte buffer that no candidate encoding could decode.
#[derive(Debug, thiserror::Error)]
#[error("could not decode text with any of: {tried}")]
pub struct DecodeError {
    /// Comma separated labels of the encodings that were attempted
    pub tried: String,
}

/// Errors raised while reading a log or table file.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl ReadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReadError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Problems with the trigger and study phrase tables.
///
/// Every variant is fatal: the engine refuses to scan with a table it
/// would have to guess about.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error(
        "Table alignment error: {phrases_path} has {phrases} entries but {labels_path} \
         has {labels}; they must match line for line"
    )]
    LengthMismatch {
        phrases: usize,
        labels: usize,
        phrases_path: String,
        labels_path: String,
    },

    #[error("Table file not found: {path}")]
    Missing { path: PathBuf },

    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Failure of one folder's scan task.
///
/// Reported per folder; the other folders of the same request still merge.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("scan task panicked: {message}")]
    Panicked { message: String },
}
