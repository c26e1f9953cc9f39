//! Data model for student-transition datasets.
//!
//! # Module Organization
//!
//! - [`label`]: the fixed catalog of semantic roles a source column can play
//! - [`mapping`]: [`ColumnMapping`], one optional source column per role
//! - [`group`]: group keys used to partition rows
//! - [`derived`]: read-only result tables produced by the aggregation engine

pub mod derived;
pub mod error;
pub mod group;
pub mod label;
pub mod mapping;

pub use derived::{
    COUNT_COLUMN, GROUP_COLUMN, RATE_COLUMN, RateRow, RateTable, SHARE_COLUMN, ShareRow,
    ShareTable, TOTAL_KEY, TotalsRow, TotalsTable,
};
pub use error::{ModelError, Result};
pub use group::{GroupKey, GroupValue};
pub use label::SemanticLabel;
pub use mapping::ColumnMapping;
