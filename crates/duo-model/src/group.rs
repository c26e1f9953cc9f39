//! Group keys.
//!
//! Grouped aggregations partition rows by the distinct value combinations of
//! one or more columns. Keys carry a total order so that results come out
//! sorted ascending no matter how the source rows were ordered.

use std::cmp::Ordering;
use std::fmt;

use polars::prelude::AnyValue;
use serde::{Deserialize, Serialize};

/// A single cell value used as (part of) a group key.
///
/// Ordering: `Missing < Bool < numbers < Text`. Integers and floats compare
/// exactly by numeric value, without a lossy round-trip through `f64`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupValue {
    Missing,
    Bool(bool),
    Int(i64),
    /// Unsigned integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    Text(String),
}

impl GroupValue {
    /// Builds a group value from a polars cell.
    ///
    /// Nulls and NaN become [`GroupValue::Missing`].
    pub fn from_any(value: AnyValue<'_>) -> Self {
        match value {
            AnyValue::Null => Self::Missing,
            AnyValue::Boolean(b) => Self::Bool(b),
            AnyValue::Int8(v) => Self::Int(i64::from(v)),
            AnyValue::Int16(v) => Self::Int(i64::from(v)),
            AnyValue::Int32(v) => Self::Int(i64::from(v)),
            AnyValue::Int64(v) => Self::Int(v),
            AnyValue::UInt8(v) => Self::Int(i64::from(v)),
            AnyValue::UInt16(v) => Self::Int(i64::from(v)),
            AnyValue::UInt32(v) => Self::Int(i64::from(v)),
            AnyValue::UInt64(v) => i64::try_from(v).map_or(Self::UInt(v), Self::Int),
            AnyValue::Float32(v) => Self::float(f64::from(v)),
            AnyValue::Float64(v) => Self::float(v),
            AnyValue::String(s) => Self::Text(s.to_string()),
            AnyValue::StringOwned(s) => Self::Text(s.to_string()),
            other => Self::Text(other.to_string()),
        }
    }

    fn float(v: f64) -> Self {
        if v.is_nan() { Self::Missing } else { Self::Float(v) }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::UInt(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
        }
    }

    fn as_int(&self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(i128::from(*v)),
            Self::UInt(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    /// Ordering of two numeric values, `None` unless both are numbers.
    fn numeric_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => {
                Some(a.partial_cmp(b).unwrap_or_else(|| a.total_cmp(b)))
            }
            (Self::Float(a), _) => other.as_int().map(|b| cmp_int_float(b, *a).reverse()),
            (_, Self::Float(b)) => self.as_int().map(|a| cmp_int_float(a, *b)),
            _ => Some(self.as_int()?.cmp(&other.as_int()?)),
        }
    }
}

/// Exact comparison of an integer with a float.
fn cmp_int_float(int: i128, float: f64) -> Ordering {
    const LIMIT: f64 = i128::MAX as f64;
    if float.is_nan() || float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }
    // In range, so the truncation is exact.
    let whole = float.trunc() as i128;
    int.cmp(&whole)
        .then_with(|| 0.0_f64.partial_cmp(&float.fract()).unwrap_or(Ordering::Equal))
}

impl Ord for GroupValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self
                .numeric_cmp(other)
                .unwrap_or_else(|| self.rank().cmp(&other.rank())),
        }
    }
}

impl PartialOrd for GroupValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GroupValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupValue {}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("(missing)"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&duo_common::format_numeric(*v)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for GroupValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for GroupValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// An ordered tuple of group values, one per grouping column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(pub Vec<GroupValue>);

impl GroupKey {
    #[must_use]
    pub fn new(values: Vec<GroupValue>) -> Self {
        Self(values)
    }

    /// Single-value key.
    #[must_use]
    pub fn single(value: impl Into<GroupValue>) -> Self {
        Self(vec![value.into()])
    }

    #[must_use]
    pub fn values(&self) -> &[GroupValue] {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, value) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(" / ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sorts_first_and_text_last() {
        let mut values = vec![
            GroupValue::Text("zorg".into()),
            GroupValue::Int(3),
            GroupValue::Missing,
            GroupValue::Float(2.5),
            GroupValue::Bool(true),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                GroupValue::Missing,
                GroupValue::Bool(true),
                GroupValue::Float(2.5),
                GroupValue::Int(3),
                GroupValue::Text("zorg".into()),
            ]
        );
    }

    #[test]
    fn int_and_float_compare_numerically() {
        assert_eq!(GroupValue::Int(2), GroupValue::Float(2.0));
        assert!(GroupValue::Int(10) > GroupValue::Float(9.5));
    }

    #[test]
    fn large_integers_stay_exact() {
        let below = GroupValue::from_any(AnyValue::UInt64(9_223_372_036_854_775_807));
        let above = GroupValue::from_any(AnyValue::UInt64(9_223_372_036_854_775_808));
        assert_eq!(below, GroupValue::Int(i64::MAX));
        assert_eq!(above, GroupValue::UInt(9_223_372_036_854_775_808));
        assert!(below < above);
        assert_eq!(above.to_string(), "9223372036854775808");

        let top = GroupValue::from_any(AnyValue::UInt64(u64::MAX));
        let next = GroupValue::from_any(AnyValue::UInt64(u64::MAX - 1));
        assert_ne!(top, next);
        assert!(next < top);
    }

    #[test]
    fn int_float_comparison_does_not_round() {
        let exact = 9_007_199_254_740_992_i64; // 2^53
        assert_ne!(GroupValue::Int(exact + 1), GroupValue::Float(exact as f64));
        assert!(GroupValue::Int(exact + 1) > GroupValue::Float(exact as f64));
        assert_eq!(GroupValue::Int(exact), GroupValue::Float(exact as f64));
        assert!(GroupValue::Int(-2) > GroupValue::Float(-2.5));
        assert!(GroupValue::UInt(u64::MAX) < GroupValue::Float(f64::INFINITY));
        assert_eq!(GroupValue::Int(0), GroupValue::Float(-0.0));
    }

    #[test]
    fn from_any_maps_nan_to_missing() {
        assert!(GroupValue::from_any(AnyValue::Float64(f64::NAN)).is_missing());
        assert!(GroupValue::from_any(AnyValue::Null).is_missing());
        assert_eq!(
            GroupValue::from_any(AnyValue::String("ict")),
            GroupValue::Text("ict".into())
        );
    }

    #[test]
    fn key_display_joins_values() {
        let key = GroupKey::new(vec![GroupValue::Int(2023), GroupValue::Text("zorg".into())]);
        assert_eq!(key.to_string(), "2023 / zorg");
    }
}
