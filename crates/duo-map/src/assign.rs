//! Mapping configuration from command-line assignments and JSON files.

use std::path::Path;

use duo_model::{ColumnMapping, SemanticLabel};

use crate::error::{MapError, Result};
use crate::resolve::Choice;

/// Parses `label=column`. An empty column (`label=`) explicitly unsets the label.
///
/// # Examples
///
/// ```
/// use duo_map::{Choice, parse_assignment};
/// use duo_model::SemanticLabel;
///
/// let (label, choice) = parse_assignment("sector=SECTOR_NAAM").unwrap();
/// assert_eq!(label, SemanticLabel::Sector);
/// assert_eq!(choice, Choice::Column("SECTOR_NAAM".to_string()));
///
/// let (_, choice) = parse_assignment("regio=").unwrap();
/// assert_eq!(choice, Choice::Unset);
/// ```
pub fn parse_assignment(raw: &str) -> Result<(SemanticLabel, Choice)> {
    let (label, column) = raw
        .split_once('=')
        .ok_or_else(|| MapError::InvalidAssignment(raw.to_string()))?;
    let label: SemanticLabel = label.parse()?;
    let column = column.trim();
    let choice = if column.is_empty() {
        Choice::Unset
    } else {
        Choice::Column(column.to_string())
    };
    Ok((label, choice))
}

/// Parses `label=v1,v2,...` into a label and its selected values.
///
/// Values are trimmed and blanks dropped, so `label=` selects nothing and
/// leaves the data unfiltered.
pub fn parse_selection(raw: &str) -> Result<(SemanticLabel, Vec<String>)> {
    let (label, values) = raw
        .split_once('=')
        .ok_or_else(|| MapError::InvalidSelection(raw.to_string()))?;
    let label: SemanticLabel = label.parse()?;
    let values = values
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    Ok((label, values))
}

/// Loads a JSON mapping file (`{"label": "column", ...}`).
pub fn load_mapping_file(path: &Path) -> Result<ColumnMapping> {
    let contents = std::fs::read_to_string(path).map_err(|source| MapError::MappingFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| MapError::MappingFileFormat {
        path: path.to_path_buf(),
        source,
    })
}
