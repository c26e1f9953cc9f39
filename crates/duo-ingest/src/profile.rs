//! Dataset profiling for the inspection view.
//!
//! Column kinds are inferred from the stored dtype, never declared: numeric
//! dtypes are measures, string and categorical dtypes are dimensions.

use std::collections::BTreeSet;

use duo_common::{any_to_string, is_numeric_dtype};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// How a column can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Integer or floating-point values.
    Numeric,
    /// Text values; candidates for grouping and filtering.
    Categorical,
    /// Booleans, dates and anything else.
    Other,
}

impl ColumnKind {
    fn from_dtype(dtype: &DataType) -> Self {
        if is_numeric_dtype(dtype) {
            Self::Numeric
        } else if matches!(dtype, DataType::String) {
            Self::Categorical
        } else {
            Self::Other
        }
    }
}

/// Summary of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    /// Polars dtype, e.g. `i64` or `str`.
    pub dtype: String,
    pub kind: ColumnKind,
    pub null_count: usize,
    /// Number of distinct non-null values.
    pub distinct_count: usize,
}

/// Summary of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
}

impl DatasetProfile {
    /// Names of categorical columns, in dataset order.
    #[must_use]
    pub fn categorical_columns(&self) -> Vec<&str> {
        self.columns_of(ColumnKind::Categorical)
    }

    /// Names of numeric columns, in dataset order.
    #[must_use]
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns_of(ColumnKind::Numeric)
    }

    /// Column names, in dataset order.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    fn columns_of(&self, kind: ColumnKind) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Profiles every column of a dataset.
pub fn profile_dataset(df: &DataFrame) -> DatasetProfile {
    let columns = df.get_columns().iter().map(profile_column).collect();
    DatasetProfile {
        rows: df.height(),
        columns,
    }
}

fn profile_column(col: &Column) -> ColumnProfile {
    let mut distinct: BTreeSet<String> = BTreeSet::new();
    for idx in 0..col.len() {
        if let Ok(value) = col.get(idx) {
            if !matches!(value, AnyValue::Null) {
                distinct.insert(any_to_string(value));
            }
        }
    }
    ColumnProfile {
        name: col.name().to_string(),
        dtype: col.dtype().to_string(),
        kind: ColumnKind::from_dtype(col.dtype()),
        null_count: col.null_count(),
        distinct_count: distinct.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_numeric_and_categorical_columns() {
        let df = df!(
            "SECTOR" => ["zorg", "zorg", "ict"],
            "AANTAL" => [10i64, 10, 5],
            "DOORSTROOM" => [true, false, true],
        )
        .unwrap();
        let profile = profile_dataset(&df);

        assert_eq!(profile.rows, 3);
        assert_eq!(profile.categorical_columns(), vec!["SECTOR"]);
        assert_eq!(profile.numeric_columns(), vec!["AANTAL"]);
        assert_eq!(profile.columns[2].kind, ColumnKind::Other);
        assert_eq!(profile.columns[0].distinct_count, 2);
    }

    #[test]
    fn counts_nulls() {
        let df = df!("REGIO" => [Some("Utrecht"), None, Some("Utrecht")]).unwrap();
        let profile = profile_dataset(&df);
        assert_eq!(profile.columns[0].null_count, 1);
        assert_eq!(profile.columns[0].distinct_count, 1);
    }
}
