//! Summed student counts.

use std::collections::BTreeMap;

use duo_model::{ColumnMapping, GroupKey, SemanticLabel, TOTAL_KEY, TotalsRow, TotalsTable};
use polars::prelude::DataFrame;
use tracing::debug;

use crate::coerce::read_weights;
use crate::columns::{group_columns, mapped_column};
use crate::error::Result;
use crate::partition::row_keys;

/// Sums the student count per distinct combination of the mapped `labels`.
///
/// With no labels the table holds one `total` row. Labels without a column
/// are dropped; if that leaves none, or the count label has no column, the
/// result is `Ok(None)`. A zero total is a valid answer here.
pub fn grouped_totals(
    df: &DataFrame,
    mapping: &ColumnMapping,
    labels: &[SemanticLabel],
) -> Result<Option<TotalsTable>> {
    let Some(weight_column) = mapped_column(df, mapping, SemanticLabel::AantalStudenten) else {
        debug!("totals need aantal_studenten mapped");
        return Ok(None);
    };
    let weights = read_weights(df.column(weight_column)?)?;

    if labels.is_empty() {
        return Ok(Some(TotalsTable {
            dimensions: Vec::new(),
            columns: Vec::new(),
            rows: vec![TotalsRow {
                key: GroupKey::single(TOTAL_KEY),
                count: weights.iter().sum(),
            }],
        }));
    }

    let groups = group_columns(df, mapping, labels);
    if groups.is_empty() {
        return Ok(None);
    }
    let columns: Vec<&str> = groups.iter().map(|(_, column)| *column).collect();

    let mut counts: BTreeMap<GroupKey, f64> = BTreeMap::new();
    for (key, weight) in row_keys(df, &columns)?.into_iter().zip(weights) {
        *counts.entry(key).or_insert(0.0) += weight;
    }

    Ok(Some(TotalsTable {
        dimensions: groups.iter().map(|(label, _)| *label).collect(),
        columns: columns.iter().map(|c| (*c).to_string()).collect(),
        rows: counts
            .into_iter()
            .map(|(key, count)| TotalsRow { key, count })
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn totals_per_year() {
        let df = df!(
            "jaar" => [2023i64, 2022, 2023],
            "n" => [5i64, 7, 8],
        )
        .unwrap();
        let mapping = ColumnMapping::new()
            .with(SemanticLabel::AantalStudenten, "n")
            .with(SemanticLabel::Instroomjaar, "jaar");
        let table = grouped_totals(&df, &mapping, &[SemanticLabel::Instroomjaar])
            .unwrap()
            .unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].key, GroupKey::single(2022i64));
        assert_eq!(table.rows[1].count, 13.0);
        assert_eq!(table.total(), 20.0);
    }

    #[test]
    fn no_labels_gives_overall_total() {
        let df = df!("n" => [0i64, 0]).unwrap();
        let mapping = ColumnMapping::new().with(SemanticLabel::AantalStudenten, "n");
        let table = grouped_totals(&df, &mapping, &[]).unwrap().unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].key, GroupKey::single(TOTAL_KEY));
        assert_eq!(table.total(), 0.0);
    }
}
