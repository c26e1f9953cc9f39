use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown label '{0}' (run `duo-stroom labels` for the catalog)")]
    UnknownLabel(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
