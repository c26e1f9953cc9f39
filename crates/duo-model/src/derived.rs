//! Derived tables.
//!
//! Every aggregation returns a fresh, read-only table that a rendering layer
//! displays as-is. Tables serialize to JSON and convert into a polars
//! `DataFrame` for renderers that want one.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::group::GroupKey;
use crate::label::SemanticLabel;

/// Key of the single row of an ungrouped rate.
pub const TOTAL_KEY: &str = "total";
/// Header of the key column of an ungrouped rate.
pub const GROUP_COLUMN: &str = "group";
/// Header of the transition percentage column.
pub const RATE_COLUMN: &str = "transition_pct";
/// Header of the share percentage column.
pub const SHARE_COLUMN: &str = "share_pct";
/// Header of the summed student count column.
pub const COUNT_COLUMN: &str = "students";

/// One group of a weighted transition rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRow {
    pub key: GroupKey,
    /// Summed weight of the group.
    pub weight: f64,
    /// Summed `indicator * weight` of the group.
    pub transitioned: f64,
    /// `100 * transitioned / weight`, `None` when the group weighs zero.
    pub percentage: Option<f64>,
}

/// Weighted transition rate, overall or per group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Labels the rows are grouped by; empty for the overall rate.
    pub dimensions: Vec<SemanticLabel>,
    /// Source columns behind `dimensions`, same order.
    pub columns: Vec<String>,
    pub rows: Vec<RateRow>,
}

impl RateTable {
    #[must_use]
    pub fn is_total(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Percentage of the row with the given key.
    #[must_use]
    pub fn percentage_for(&self, key: &GroupKey) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| &row.key == key)
            .and_then(|row| row.percentage)
    }

    /// Summed weight over all rows.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.rows.iter().map(|row| row.weight).sum()
    }

    /// Converts the table into a `DataFrame`: one string column per
    /// dimension (or a single `group` column) followed by the percentage.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns = key_columns(&self.dimensions, self.rows.iter().map(|r| &r.key));
        columns.push(Column::new(
            RATE_COLUMN.into(),
            self.rows.iter().map(|r| r.percentage).collect::<Vec<_>>(),
        ));
        DataFrame::new(columns)
    }
}

/// One category of a share-of-total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRow {
    pub key: GroupKey,
    /// Summed student count of the category.
    pub count: f64,
    /// `100 * count / total`.
    pub percentage: f64,
}

/// Share of the total student count per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareTable {
    pub dimension: SemanticLabel,
    pub column: String,
    /// Summed student count over all categories.
    pub total: f64,
    pub rows: Vec<ShareRow>,
}

impl ShareTable {
    #[must_use]
    pub fn percentage_for(&self, key: &GroupKey) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| &row.key == key)
            .map(|row| row.percentage)
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns = key_columns(&[self.dimension], self.rows.iter().map(|r| &r.key));
        columns.push(Column::new(
            COUNT_COLUMN.into(),
            self.rows.iter().map(|r| r.count).collect::<Vec<_>>(),
        ));
        columns.push(Column::new(
            SHARE_COLUMN.into(),
            self.rows.iter().map(|r| r.percentage).collect::<Vec<_>>(),
        ));
        DataFrame::new(columns)
    }
}

/// One group of summed student counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsRow {
    pub key: GroupKey,
    pub count: f64,
}

/// Summed student counts, overall or per group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsTable {
    pub dimensions: Vec<SemanticLabel>,
    pub columns: Vec<String>,
    pub rows: Vec<TotalsRow>,
}

impl TotalsTable {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|row| row.count).sum()
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns = key_columns(&self.dimensions, self.rows.iter().map(|r| &r.key));
        columns.push(Column::new(
            COUNT_COLUMN.into(),
            self.rows.iter().map(|r| r.count).collect::<Vec<_>>(),
        ));
        DataFrame::new(columns)
    }
}

fn key_columns<'a>(
    dimensions: &[SemanticLabel],
    keys: impl Iterator<Item = &'a GroupKey> + Clone,
) -> Vec<Column> {
    if dimensions.is_empty() {
        let values: Vec<String> = keys.map(ToString::to_string).collect();
        return vec![Column::new(GROUP_COLUMN.into(), values)];
    }
    dimensions
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let values: Vec<String> = keys
                .clone()
                .map(|key| {
                    key.values()
                        .get(idx)
                        .map(ToString::to_string)
                        .unwrap_or_default()
                })
                .collect();
            Column::new(label.key().into(), values)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupValue;

    fn sector_rates() -> RateTable {
        RateTable {
            dimensions: vec![SemanticLabel::Sector],
            columns: vec!["SECTOR".to_string()],
            rows: vec![
                RateRow {
                    key: GroupKey::single("ict"),
                    weight: 5.0,
                    transitioned: 5.0,
                    percentage: Some(100.0),
                },
                RateRow {
                    key: GroupKey::single("zorg"),
                    weight: 0.0,
                    transitioned: 0.0,
                    percentage: None,
                },
            ],
        }
    }

    #[test]
    fn rate_dataframe_uses_label_headers() {
        let df = sector_rates().to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["sector", RATE_COLUMN]);
        assert_eq!(df.column(RATE_COLUMN).unwrap().null_count(), 1);
    }

    #[test]
    fn total_rate_dataframe_has_group_column() {
        let table = RateTable {
            dimensions: vec![],
            columns: vec![],
            rows: vec![RateRow {
                key: GroupKey::single(TOTAL_KEY),
                weight: 25.0,
                transitioned: 15.0,
                percentage: Some(60.0),
            }],
        };
        assert!(table.is_total());
        let df = table.to_dataframe().unwrap();
        let group = df.column(GROUP_COLUMN).unwrap();
        assert_eq!(group.get(0).unwrap(), AnyValue::String(TOTAL_KEY));
    }

    #[test]
    fn percentage_lookup() {
        let table = sector_rates();
        assert_eq!(table.percentage_for(&GroupKey::single("ict")), Some(100.0));
        assert_eq!(table.percentage_for(&GroupKey::single("zorg")), None);
        assert_eq!(
            table.percentage_for(&GroupKey::new(vec![GroupValue::Missing])),
            None
        );
    }

    #[test]
    fn share_table_serializes_keys_as_plain_values() {
        let table = ShareTable {
            dimension: SemanticLabel::Regio,
            column: "REGIO".to_string(),
            total: 4.0,
            rows: vec![
                ShareRow {
                    key: GroupKey::new(vec![GroupValue::Missing]),
                    count: 1.0,
                    percentage: 25.0,
                },
                ShareRow {
                    key: GroupKey::single("Utrecht"),
                    count: 3.0,
                    percentage: 75.0,
                },
            ],
        };
        insta::assert_json_snapshot!(table, @r#"
        {
          "dimension": "regio",
          "column": "REGIO",
          "total": 4.0,
          "rows": [
            {
              "key": [
                null
              ],
              "count": 1.0,
              "percentage": 25.0
            },
            {
              "key": [
                "Utrecht"
              ],
              "count": 3.0,
              "percentage": 75.0
            }
          ]
        }
        "#);
    }
}
