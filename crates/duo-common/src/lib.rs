//! Shared utilities for the duo-stroom crates.
//!
//! This crate provides the polars `AnyValue` conversions every other crate
//! relies on when reading cells out of a loaded dataset.

pub mod polars;

pub use self::polars::{
    any_to_bool, any_to_f64, any_to_string, format_numeric, is_numeric_dtype, parse_bool,
    parse_f64,
};
