//! Cell coercion for weights and indicators.

use duo_common::{any_to_bool, any_to_f64, any_to_string};
use polars::prelude::{AnyValue, Column};
use tracing::debug;

use crate::error::{AggregateError, Result};
use crate::options::IndicatorPolicy;

/// Weight of a cell: its numeric value, or `None` for nulls, text, NaN and
/// infinities.
pub fn weight_value(value: AnyValue<'_>) -> Option<f64> {
    any_to_f64(value).filter(|v| v.is_finite())
}

/// Indicator of a cell: `Some(0.0)` or `Some(1.0)`, `None` when not coercible.
///
/// Booleans map to 1/0. Numbers (and numeric strings) are truncated toward
/// zero and accepted when that gives 0 or 1. `true`/`false` strings count as
/// booleans.
///
/// ```
/// use duo_aggregate::indicator_value;
/// use polars::prelude::AnyValue;
///
/// assert_eq!(indicator_value(AnyValue::Boolean(true)), Some(1.0));
/// assert_eq!(indicator_value(AnyValue::Float64(0.6)), Some(0.0));
/// assert_eq!(indicator_value(AnyValue::String("1")), Some(1.0));
/// assert_eq!(indicator_value(AnyValue::Int64(2)), None);
/// assert_eq!(indicator_value(AnyValue::String("ja")), None);
/// ```
pub fn indicator_value(value: AnyValue<'_>) -> Option<f64> {
    if let Some(flag) = any_to_bool(value.clone()) {
        return Some(if flag { 1.0 } else { 0.0 });
    }
    let truncated = any_to_f64(value)?.trunc();
    (truncated == 0.0 || truncated == 1.0).then_some(truncated.abs())
}

/// Reads a weight column; unusable cells weigh 0.
pub(crate) fn read_weights(column: &Column) -> Result<Vec<f64>> {
    let mut weights = Vec::with_capacity(column.len());
    let mut skipped = 0usize;
    for idx in 0..column.len() {
        match weight_value(column.get(idx)?) {
            Some(weight) => weights.push(weight),
            None => {
                skipped += 1;
                weights.push(0.0);
            }
        }
    }
    if skipped > 0 {
        debug!(column = %column.name(), skipped, "weight cells without a number counted as 0");
    }
    Ok(weights)
}

/// Reads an indicator column under `policy`.
pub(crate) fn read_indicators(column: &Column, policy: IndicatorPolicy) -> Result<Vec<f64>> {
    let mut indicators = Vec::with_capacity(column.len());
    let mut zeroed = 0usize;
    for idx in 0..column.len() {
        let value = column.get(idx)?;
        match indicator_value(value.clone()) {
            Some(flag) => indicators.push(flag),
            None => match policy {
                IndicatorPolicy::Lenient => {
                    zeroed += 1;
                    indicators.push(0.0);
                }
                IndicatorPolicy::Strict => {
                    return Err(AggregateError::NonCoercibleIndicator {
                        column: column.name().to_string(),
                        row: idx,
                        value: any_to_string(value),
                    });
                }
            },
        }
    }
    if zeroed > 0 {
        debug!(column = %column.name(), zeroed, "non-coercible indicator cells counted as 0");
    }
    Ok(indicators)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn weights_skip_nulls_and_text() {
        let column = Column::new("n".into(), [Some(10.0), None, Some(2.5)]);
        assert_eq!(read_weights(&column).unwrap(), vec![10.0, 0.0, 2.5]);

        let column = Column::new("n".into(), ["4", "veel", " 6 "]);
        assert_eq!(read_weights(&column).unwrap(), vec![4.0, 0.0, 6.0]);
    }

    #[test]
    fn non_finite_weights_count_as_zero() {
        let column = Column::new("n".into(), [f64::INFINITY, f64::NAN, 3.0]);
        assert_eq!(read_weights(&column).unwrap(), vec![0.0, 0.0, 3.0]);
        assert_eq!(weight_value(AnyValue::String("inf")), None);
        assert_eq!(weight_value(AnyValue::Float64(f64::NEG_INFINITY)), None);
    }

    #[test]
    fn lenient_policy_zeroes_unknown_flags() {
        let column = Column::new("d".into(), ["1", "ja", "0", "TRUE"]);
        assert_eq!(
            read_indicators(&column, IndicatorPolicy::Lenient).unwrap(),
            vec![1.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn strict_policy_names_the_offending_cell() {
        let column = Column::new("d".into(), [1i64, 0, 2]);
        let err = read_indicators(&column, IndicatorPolicy::Strict).unwrap_err();
        match err {
            AggregateError::NonCoercibleIndicator { column, row, value } => {
                assert_eq!(column, "d");
                assert_eq!(row, 2);
                assert_eq!(value, "2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_fractions_truncate_to_zero() {
        assert_eq!(indicator_value(AnyValue::Float64(-0.5)), Some(0.0));
        assert_eq!(indicator_value(AnyValue::Float64(f64::NAN)), None);
        assert_eq!(indicator_value(AnyValue::Null), None);
    }
}
