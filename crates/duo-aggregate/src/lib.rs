#![deny(unsafe_code)]

//! Aggregation engine.
//!
//! Pure functions over a loaded dataset and a [`ColumnMapping`]:
//!
//! - [`weighted_rate`]: percentage of students flagged as transitioned,
//!   overall or per group
//! - [`share_of_total`]: each category's share of the total student count
//! - [`grouped_totals`]: summed student counts per group
//! - [`filter_by_values`] / [`apply_filters`]: row selection by value
//!
//! None of them mutate their inputs. A missing or stale mapping is not an
//! error: the operation returns `Ok(None)` and the caller shows guidance.
//!
//! [`ColumnMapping`]: duo_model::ColumnMapping

mod coerce;
mod columns;
pub mod error;
pub mod filter;
pub mod options;
mod partition;
pub mod rate;
pub mod share;
pub mod totals;

pub use coerce::{indicator_value, weight_value};
pub use columns::mapped_column;
pub use error::{AggregateError, Result};
pub use filter::{LabelFilter, apply_filters, distinct_values, filter_by_values};
pub use options::{AggregateOptions, IndicatorPolicy};
pub use rate::weighted_rate;
pub use share::share_of_total;
pub use totals::grouped_totals;
