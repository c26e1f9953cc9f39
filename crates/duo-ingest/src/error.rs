//! Error types for dataset ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Decoding Errors ===
    /// Bytes are not valid in the requested encoding.
    #[error("{source_name} is not valid {encoding}; try another encoding")]
    Decode {
        source_name: String,
        encoding: &'static str,
    },

    /// Encoding recognised from a byte-order mark but not supported.
    #[error("{source_name} is encoded as {encoding}, which is not supported")]
    UnsupportedEncoding {
        source_name: String,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse {source_name}: {message}")]
    CsvParse {
        source_name: String,
        message: String,
    },

    /// File is empty or has no valid rows.
    #[error("{source_name} is empty")]
    EmptyCsv { source_name: String },

    /// A header cell is blank.
    #[error("{source_name} has an empty column name")]
    EmptyColumnName { source_name: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
