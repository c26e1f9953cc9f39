//! Row selection by value.

use std::collections::{BTreeSet, HashSet};

use duo_common::any_to_string;
use duo_model::{ColumnMapping, GroupValue, SemanticLabel};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::columns::mapped_column;
use crate::error::Result;

/// Keeps the rows whose value in `column` is one of `selected`.
///
/// Cells are compared by their display text, so `"2023"` selects an integer
/// `2023`. Null cells never match. An empty selection or a column the frame
/// lacks leaves the frame unfiltered.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use duo_aggregate::filter_by_values;
///
/// let df = df!("sector" => ["zorg", "ict", "zorg"]).unwrap();
/// let zorg = filter_by_values(&df, "sector", &["zorg"]).unwrap();
/// assert_eq!(zorg.height(), 2);
///
/// let none: &[&str] = &[];
/// assert_eq!(filter_by_values(&df, "sector", none).unwrap().height(), 3);
/// ```
pub fn filter_by_values<S: AsRef<str>>(
    df: &DataFrame,
    column: &str,
    selected: &[S],
) -> Result<DataFrame> {
    if selected.is_empty() {
        return Ok(df.clone());
    }
    let Some(idx) = df.get_column_index(column) else {
        debug!(column = %column, "filter column not in dataset");
        return Ok(df.clone());
    };

    let wanted: HashSet<&str> = selected.iter().map(|value| value.as_ref()).collect();
    let col = &df.get_columns()[idx];
    let mut mask = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let keep = match col.get(row)? {
            AnyValue::Null => false,
            value => wanted.contains(any_to_string(value).as_str()),
        };
        mask.push(keep);
    }
    let mask = BooleanChunked::from_slice(PlSmallStr::from_static("mask"), &mask);
    let filtered = df.filter(&mask)?;
    debug!(
        column = %column,
        selected = selected.len(),
        before = df.height(),
        after = filtered.height(),
        "rows filtered"
    );
    Ok(filtered)
}

/// Sorted distinct non-null values of `column`; empty when the column is absent.
pub fn distinct_values(df: &DataFrame, column: &str) -> Result<Vec<GroupValue>> {
    let Some(idx) = df.get_column_index(column) else {
        return Ok(Vec::new());
    };
    let col = &df.get_columns()[idx];
    let mut values = BTreeSet::new();
    for row in 0..col.len() {
        let value = GroupValue::from_any(col.get(row)?);
        if !value.is_missing() {
            values.insert(value);
        }
    }
    Ok(values.into_iter().collect())
}

/// Selection on the column behind a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelFilter {
    pub label: SemanticLabel,
    pub values: Vec<String>,
}

impl LabelFilter {
    #[must_use]
    pub fn new(label: SemanticLabel, values: Vec<String>) -> Self {
        Self { label, values }
    }
}

/// Applies every filter in turn through the mapping.
///
/// Filters on labels without a column are skipped.
pub fn apply_filters(
    df: &DataFrame,
    mapping: &ColumnMapping,
    filters: &[LabelFilter],
) -> Result<DataFrame> {
    let mut current = df.clone();
    for filter in filters {
        match mapped_column(&current, mapping, filter.label) {
            Some(column) => current = filter_by_values(&current, column, &filter.values)?,
            None => debug!(label = %filter.label, "filter label not mapped, skipped"),
        }
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df!(
            "jaar" => [2022i64, 2023, 2023, 2024],
            "sector" => [Some("zorg"), Some("ict"), None, Some("zorg")],
        )
        .unwrap()
    }

    #[test]
    fn numeric_cells_match_their_display_text() {
        let df = filter_by_values(&frame(), "jaar", &["2023", "2024"]).unwrap();
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn nulls_never_match() {
        let df = filter_by_values(&frame(), "sector", &["zorg", ""]).unwrap();
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn absent_column_is_a_no_op() {
        let df = filter_by_values(&frame(), "regio", &["Utrecht"]).unwrap();
        assert_eq!(df.height(), 4);
    }

    #[test]
    fn distinct_values_are_sorted_without_nulls() {
        let values = distinct_values(&frame(), "sector").unwrap();
        assert_eq!(values, vec![GroupValue::from("ict"), GroupValue::from("zorg")]);
        assert!(distinct_values(&frame(), "regio").unwrap().is_empty());
    }

    #[test]
    fn filters_combine_through_the_mapping() {
        let mapping = ColumnMapping::new()
            .with(SemanticLabel::Instroomjaar, "jaar")
            .with(SemanticLabel::Sector, "sector");
        let filters = vec![
            LabelFilter::new(SemanticLabel::Instroomjaar, vec!["2023".into(), "2024".into()]),
            LabelFilter::new(SemanticLabel::Sector, vec!["zorg".into()]),
            LabelFilter::new(SemanticLabel::Regio, vec!["Utrecht".into()]),
        ];
        let df = apply_filters(&frame(), &mapping, &filters).unwrap();
        assert_eq!(df.height(), 1);
        let jaar = df.column("jaar").unwrap();
        assert_eq!(jaar.get(0).unwrap(), AnyValue::Int64(2024));
    }
}
