//! Mapping validation against the live dataset.

use duo_model::{ColumnMapping, SemanticLabel};
use polars::prelude::DataFrame;

/// The column `label` maps to, if the dataset has it.
///
/// Every aggregation reads the mapping through here, so stale entries left
/// over from a previous dataset read as unset.
pub fn mapped_column<'a>(
    df: &DataFrame,
    mapping: &'a ColumnMapping,
    label: SemanticLabel,
) -> Option<&'a str> {
    mapping.column_if(label, |column| df.get_column_index(column).is_some())
}

/// Resolves grouping labels, silently dropping those without a column.
pub(crate) fn group_columns<'a>(
    df: &DataFrame,
    mapping: &'a ColumnMapping,
    labels: &[SemanticLabel],
) -> Vec<(SemanticLabel, &'a str)> {
    labels
        .iter()
        .filter_map(|&label| mapped_column(df, mapping, label).map(|column| (label, column)))
        .collect()
}
