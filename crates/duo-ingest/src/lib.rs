//! Dataset ingestion.
//!
//! This crate turns an uploaded delimited text file into a polars
//! `DataFrame` and profiles it for the data-inspection view.
//!
//! # Features
//!
//! - **CSV Loading**: explicit separator and encoding (UTF-8 or Latin-1)
//! - **Profiling**: row/column counts, dtypes, numeric vs categorical columns
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use duo_ingest::{Encoding, LoadOptions, profile_dataset, read_dataset};
//!
//! let options = LoadOptions::default()
//!     .with_separator(b';')
//!     .with_encoding(Encoding::Latin1);
//! let df = read_dataset(Path::new("doorstroom.csv"), &options)?;
//! let profile = profile_dataset(&df);
//! println!("{} rows, {} columns", profile.rows, profile.columns.len());
//! ```

mod csv;
mod error;
mod profile;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    Encoding, LoadOptions, MAX_CSV_FILE_SIZE, read_dataset, read_dataset_from_bytes,
};

// === Profiling ===
pub use profile::{ColumnKind, ColumnProfile, DatasetProfile, profile_dataset};
