//! Weighted transition rate.

use std::collections::BTreeMap;

use duo_model::{ColumnMapping, GroupKey, RateRow, RateTable, SemanticLabel, TOTAL_KEY};
use polars::prelude::DataFrame;
use tracing::debug;

use crate::coerce::{read_indicators, read_weights};
use crate::columns::{group_columns, mapped_column};
use crate::error::Result;
use crate::options::AggregateOptions;
use crate::partition::row_keys;

/// Percentage of students flagged as transitioned, weighted by student count.
///
/// With no `group_labels` the result is a single `total` row:
/// `100 * Σ(indicator · weight) / Σ weight`. With group labels, rows are
/// partitioned by the distinct values of the mapped columns (labels without
/// a column in `df` are dropped) and the same ratio is computed per group,
/// sorted ascending by key. A group with no positive weight keeps its row
/// with a `None` percentage.
///
/// Returns `Ok(None)` when the count or indicator label is unmapped or its
/// column is missing, when the overall weight is zero or overflows, or when none of the
/// requested group labels has a column.
///
/// # Errors
///
/// Only [`IndicatorPolicy::Strict`](crate::IndicatorPolicy::Strict) rejects
/// data: an indicator cell that is not 0/1 or true/false fails the call.
pub fn weighted_rate(
    df: &DataFrame,
    mapping: &ColumnMapping,
    group_labels: &[SemanticLabel],
    options: &AggregateOptions,
) -> Result<Option<RateTable>> {
    let (Some(weight_column), Some(indicator_column)) = (
        mapped_column(df, mapping, SemanticLabel::AantalStudenten),
        mapped_column(df, mapping, SemanticLabel::DoorstroomIndicator),
    ) else {
        debug!("weighted rate needs aantal_studenten and doorstroom_indicator");
        return Ok(None);
    };

    let weights = read_weights(df.column(weight_column)?)?;
    let indicators = read_indicators(df.column(indicator_column)?, options.indicator_policy)?;

    if group_labels.is_empty() {
        let weight: f64 = weights.iter().sum();
        if weight == 0.0 {
            debug!(column = %weight_column, "total weight is zero");
            return Ok(None);
        }
        let transitioned: f64 = weighted_sum(&weights, &indicators);
        let Some(percentage) = percentage(transitioned, weight) else {
            debug!(column = %weight_column, "overall rate is not finite");
            return Ok(None);
        };
        return Ok(Some(RateTable {
            dimensions: Vec::new(),
            columns: Vec::new(),
            rows: vec![RateRow {
                key: GroupKey::single(TOTAL_KEY),
                weight,
                transitioned,
                percentage: Some(percentage),
            }],
        }));
    }

    let groups = group_columns(df, mapping, group_labels);
    if groups.is_empty() {
        debug!(?group_labels, "no group label has a column");
        return Ok(None);
    }
    let columns: Vec<&str> = groups.iter().map(|(_, column)| *column).collect();
    let keys = row_keys(df, &columns)?;

    let mut sums: BTreeMap<GroupKey, (f64, f64)> = BTreeMap::new();
    for ((key, weight), indicator) in keys.into_iter().zip(&weights).zip(&indicators) {
        let entry = sums.entry(key).or_insert((0.0, 0.0));
        entry.0 += weight;
        entry.1 += indicator * weight;
    }

    let rows = sums
        .into_iter()
        .map(|(key, (weight, transitioned))| RateRow {
            key,
            weight,
            transitioned,
            percentage: percentage(transitioned, weight),
        })
        .collect::<Vec<_>>();
    debug!(groups = rows.len(), ?columns, "weighted rate computed");

    Ok(Some(RateTable {
        dimensions: groups.iter().map(|(label, _)| *label).collect(),
        columns: columns.iter().map(|c| (*c).to_string()).collect(),
        rows,
    }))
}

/// `100 * part / whole`; `None` unless `whole` is positive and the ratio finite.
fn percentage(part: f64, whole: f64) -> Option<f64> {
    if whole <= 0.0 || !whole.is_finite() {
        return None;
    }
    Some(100.0 * part / whole).filter(|pct| pct.is_finite())
}

fn weighted_sum(weights: &[f64], indicators: &[f64]) -> f64 {
    weights
        .iter()
        .zip(indicators)
        .map(|(weight, indicator)| weight * indicator)
        .sum()
}
