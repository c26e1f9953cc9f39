//! Label resolution: explicit choice, then suggestion, then unset.

use duo_model::SemanticLabel;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An explicit user choice for a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "column")]
pub enum Choice {
    /// Use this column.
    Column(String),
    /// Leave the label unmapped, even if a column would be suggested.
    Unset,
}

impl Choice {
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::Column(column) => Some(column),
            Self::Unset => None,
        }
    }
}

/// Resolves the column for `label` against the columns that exist now.
///
/// A chosen column wins when it exists. An explicit [`Choice::Unset`] wins
/// outright. Otherwise the suggestion is used when it exists; failing that
/// the label is unset.
pub fn resolve<'a, S: AsRef<str>>(
    label: SemanticLabel,
    choice: Option<&'a Choice>,
    suggestion: Option<&'a str>,
    columns: &[S],
) -> Option<&'a str> {
    let exists = |name: &str| columns.iter().any(|c| c.as_ref() == name);
    match choice {
        Some(Choice::Unset) => return None,
        Some(Choice::Column(column)) if exists(column.as_str()) => return Some(column.as_str()),
        Some(Choice::Column(column)) => {
            debug!(label = %label, column = %column, "chosen column not in dataset, falling back");
        }
        None => {}
    }
    suggestion.filter(|name| exists(*name))
}
