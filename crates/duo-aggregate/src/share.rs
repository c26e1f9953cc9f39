//! Share of the total student count per category.

use std::collections::BTreeMap;

use duo_model::{ColumnMapping, GroupKey, SemanticLabel, ShareRow, ShareTable};
use polars::prelude::DataFrame;
use tracing::debug;

use crate::coerce::read_weights;
use crate::columns::mapped_column;
use crate::error::Result;
use crate::partition::row_keys;

/// Each distinct value of `label`'s column with its share of the summed
/// student count, sorted ascending by value.
///
/// Null cells form their own `(missing)` category, so the shares always add
/// up to 100. Returns `Ok(None)` when `label` or the count label has no
/// column, or when the total count is zero or not finite. Non-finite cells
/// count as 0.
pub fn share_of_total(
    df: &DataFrame,
    mapping: &ColumnMapping,
    label: SemanticLabel,
) -> Result<Option<ShareTable>> {
    let (Some(category_column), Some(weight_column)) = (
        mapped_column(df, mapping, label),
        mapped_column(df, mapping, SemanticLabel::AantalStudenten),
    ) else {
        debug!(label = %label, "share needs the label and aantal_studenten mapped");
        return Ok(None);
    };

    let weights = read_weights(df.column(weight_column)?)?;
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        debug!(column = %weight_column, total, "total weight is not positive");
        return Ok(None);
    }

    let keys = row_keys(df, &[category_column])?;
    let mut counts: BTreeMap<GroupKey, f64> = BTreeMap::new();
    for (key, weight) in keys.into_iter().zip(weights) {
        *counts.entry(key).or_insert(0.0) += weight;
    }

    let rows = counts
        .into_iter()
        .map(|(key, count)| ShareRow {
            key,
            count,
            percentage: 100.0 * count / total,
        })
        .collect::<Vec<_>>();
    debug!(label = %label, categories = rows.len(), "share of total computed");

    Ok(Some(ShareTable {
        dimension: label,
        column: category_column.to_string(),
        total,
        rows,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use duo_model::GroupValue;
    use polars::prelude::*;

    fn mapping() -> ColumnMapping {
        ColumnMapping::new()
            .with(SemanticLabel::AantalStudenten, "n")
            .with(SemanticLabel::Regio, "regio")
    }

    #[test]
    fn shares_follow_summed_counts() {
        let df = df!(
            "n" => [30i64, 10, 60],
            "regio" => ["Utrecht", "Groningen", "Utrecht"],
        )
        .unwrap();
        let table = share_of_total(&df, &mapping(), SemanticLabel::Regio)
            .unwrap()
            .unwrap();
        assert_eq!(table.total, 100.0);
        assert_eq!(table.column, "regio");
        assert_eq!(table.rows[0].key, GroupKey::single("Groningen"));
        assert_eq!(table.rows[0].percentage, 10.0);
        assert_eq!(table.percentage_for(&GroupKey::single("Utrecht")), Some(90.0));
    }

    #[test]
    fn null_categories_keep_their_share() {
        let df = df!(
            "n" => [1i64, 3],
            "regio" => [None, Some("Utrecht")],
        )
        .unwrap();
        let table = share_of_total(&df, &mapping(), SemanticLabel::Regio)
            .unwrap()
            .unwrap();
        assert_eq!(table.rows[0].key, GroupKey::new(vec![GroupValue::Missing]));
        assert_eq!(table.rows[0].percentage, 25.0);
    }

    #[test]
    fn infinite_weights_drop_out_of_the_shares() {
        let df = df!(
            "n" => [f64::INFINITY, 5.0],
            "regio" => ["Utrecht", "Groningen"],
        )
        .unwrap();
        let table = share_of_total(&df, &mapping(), SemanticLabel::Regio)
            .unwrap()
            .unwrap();
        assert_eq!(table.total, 5.0);
        assert!(table.rows.iter().all(|row| row.percentage.is_finite()));
        assert_eq!(table.percentage_for(&GroupKey::single("Utrecht")), Some(0.0));
        assert_eq!(table.percentage_for(&GroupKey::single("Groningen")), Some(100.0));
    }

    #[test]
    fn zero_total_yields_none() {
        let df = df!("n" => [0i64, 0], "regio" => ["a", "b"]).unwrap();
        assert!(share_of_total(&df, &mapping(), SemanticLabel::Regio)
            .unwrap()
            .is_none());
    }

    #[test]
    fn unmapped_label_yields_none() {
        let df = df!("n" => [1i64], "regio" => ["a"]).unwrap();
        assert!(share_of_total(&df, &mapping(), SemanticLabel::Sector)
            .unwrap()
            .is_none());
    }
}
