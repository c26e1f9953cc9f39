//! Error types for mapping operations.

use std::path::PathBuf;

use duo_model::ModelError;
use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Error)]
pub enum MapError {
    /// Label key not in the catalog.
    #[error(transparent)]
    UnknownLabel(#[from] ModelError),

    /// A `label=column` argument without `=`.
    #[error("invalid mapping '{0}', expected label=column")]
    InvalidAssignment(String),

    /// A `label=values` argument without `=`.
    #[error("invalid filter '{0}', expected label=value1,value2")]
    InvalidSelection(String),

    /// Mapping file could not be read.
    #[error("failed to read mapping file {path}: {source}")]
    MappingFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Mapping file is not a valid label-to-column object.
    #[error("invalid mapping file {path}: {source}")]
    MappingFileFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, MapError>;
