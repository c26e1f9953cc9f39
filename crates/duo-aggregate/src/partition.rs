//! Row partitioning by group key.

use duo_model::{GroupKey, GroupValue};
use polars::prelude::DataFrame;

use crate::error::Result;

/// Group key of every row for the given columns.
///
/// Null cells take part as [`GroupValue::Missing`], so every row lands in
/// exactly one partition.
pub(crate) fn row_keys(df: &DataFrame, columns: &[&str]) -> Result<Vec<GroupKey>> {
    let series = columns
        .iter()
        .map(|name| df.column(name))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let mut keys = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut values = Vec::with_capacity(series.len());
        for column in &series {
            values.push(GroupValue::from_any(column.get(idx)?));
        }
        keys.push(GroupKey::new(values));
    }
    Ok(keys)
}
