//! Error types for aggregation.

use thiserror::Error;

/// Errors from aggregation. Missing mappings are not errors.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// Indicator cell that is not 0/1 or true/false, under the strict policy.
    #[error("column '{column}' row {row}: '{value}' is not a 0/1 or true/false indicator")]
    NonCoercibleIndicator {
        column: String,
        row: usize,
        value: String,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for AggregateError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregateError>;
