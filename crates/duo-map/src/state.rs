//! Mapping state for one interactive session.
//!
//! This tracks the columns of the currently loaded dataset and the user's
//! explicit choices. Choices survive loading a new dataset; they are
//! re-validated against the current columns on every read, so a choice that
//! names a vanished column simply stops resolving.

use std::collections::BTreeMap;

use duo_model::{ColumnMapping, SemanticLabel};
use tracing::{debug, warn};

use crate::resolve::{Choice, resolve};
use crate::suggest::suggest;

/// State of the label mapping for a single session.
#[derive(Debug, Clone, Default)]
pub struct MappingState {
    /// Column names of the loaded dataset, in dataset order.
    columns: Vec<String>,
    /// Explicit user choices.
    choices: BTreeMap<SemanticLabel, Choice>,
}

impl MappingState {
    /// Create a state for a dataset with the given columns.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            choices: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Switch to a newly loaded dataset.
    ///
    /// Choices are kept; those naming columns the new dataset lacks are
    /// reported and will read as unresolved until the column reappears.
    pub fn replace_columns(&mut self, columns: Vec<String>) {
        self.columns = columns;
        for (label, choice) in &self.choices {
            if let Some(column) = choice.column() {
                if !self.has_column(column) {
                    warn!(label = %label, column = %column, "mapped column not in new dataset");
                }
            }
        }
    }

    /// Choose a column for a label.
    pub fn choose(&mut self, label: SemanticLabel, column: impl Into<String>) {
        let column = column.into();
        debug!(label = %label, column = %column, "column chosen");
        self.choices.insert(label, Choice::Column(column));
    }

    /// Explicitly leave a label unmapped.
    pub fn unset(&mut self, label: SemanticLabel) {
        debug!(label = %label, "label unset");
        self.choices.insert(label, Choice::Unset);
    }

    /// Drop the explicit choice so the suggestion applies again.
    pub fn clear_choice(&mut self, label: SemanticLabel) -> bool {
        self.choices.remove(&label).is_some()
    }

    /// Record every mapped entry of `mapping` as an explicit choice.
    pub fn apply(&mut self, mapping: &ColumnMapping) {
        for (label, column) in mapping.iter() {
            if let Some(column) = column {
                self.choose(label, column);
            }
        }
    }

    /// Apply a parsed `label=column` assignment.
    pub fn assign(&mut self, label: SemanticLabel, choice: Choice) {
        match choice {
            Choice::Column(column) => self.choose(label, column),
            Choice::Unset => self.unset(label),
        }
    }

    #[must_use]
    pub fn choice(&self, label: SemanticLabel) -> Option<&Choice> {
        self.choices.get(&label)
    }

    /// The heuristic suggestion for a label.
    #[must_use]
    pub fn suggestion(&self, label: SemanticLabel) -> Option<&str> {
        suggest(label, &self.columns)
    }

    /// The column a label resolves to right now.
    #[must_use]
    pub fn column_for(&self, label: SemanticLabel) -> Option<&str> {
        resolve(
            label,
            self.choice(label),
            self.suggestion(label),
            &self.columns,
        )
    }

    /// Mapping with every label resolved against the current columns.
    #[must_use]
    pub fn resolved(&self) -> ColumnMapping {
        let mut mapping = ColumnMapping::new();
        for label in SemanticLabel::ALL {
            mapping.set(label, self.column_for(label).map(str::to_string));
        }
        mapping
    }

    /// Where a label's column comes from.
    #[must_use]
    pub fn status(&self, label: SemanticLabel) -> LabelStatus {
        match self.choice(label) {
            Some(Choice::Unset) => LabelStatus::Unset,
            Some(Choice::Column(column)) if self.has_column(column) => LabelStatus::Chosen,
            Some(Choice::Column(_)) => LabelStatus::Stale,
            None if self.suggestion(label).is_some() => LabelStatus::Suggested,
            None => LabelStatus::Unmapped,
        }
    }

    /// Get summary counts.
    #[must_use]
    pub fn summary(&self) -> MappingSummary {
        let mut summary = MappingSummary {
            total_labels: SemanticLabel::ALL.len(),
            ..MappingSummary::default()
        };
        for label in SemanticLabel::ALL {
            match self.status(label) {
                LabelStatus::Chosen => summary.chosen += 1,
                LabelStatus::Suggested => summary.suggested += 1,
                LabelStatus::Stale => summary.stale += 1,
                LabelStatus::Unset | LabelStatus::Unmapped => summary.unmapped += 1,
            }
        }
        summary
    }

    fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Status of a label's mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStatus {
    /// Explicit choice naming an existing column.
    Chosen,
    /// No choice; the heuristic found a column.
    Suggested,
    /// Explicit choice naming a column the dataset lacks.
    Stale,
    /// Explicitly left unmapped.
    Unset,
    /// No choice and no suggestion.
    Unmapped,
}

impl LabelStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chosen => "chosen",
            Self::Suggested => "suggested",
            Self::Stale => "stale",
            Self::Unset => "unset",
            Self::Unmapped => "unmapped",
        }
    }
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappingSummary {
    pub total_labels: usize,
    pub chosen: usize,
    pub suggested: usize,
    pub stale: usize,
    pub unmapped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn suggestions_fill_unchosen_labels() {
        let state = MappingState::new(columns(&["instroomjaar", "aantal", "sector"]));
        let resolved = state.resolved();
        assert_eq!(resolved.get(SemanticLabel::AantalStudenten), Some("aantal"));
        assert_eq!(resolved.get(SemanticLabel::Sector), Some("sector"));
        assert_eq!(state.status(SemanticLabel::Sector), LabelStatus::Suggested);
        assert_eq!(state.status(SemanticLabel::Regio), LabelStatus::Unmapped);
    }

    #[test]
    fn choices_survive_new_dataset_but_stop_resolving() {
        let mut state = MappingState::new(columns(&["SECTOR_OUD", "N"]));
        state.choose(SemanticLabel::Sector, "SECTOR_OUD");
        assert_eq!(state.column_for(SemanticLabel::Sector), Some("SECTOR_OUD"));

        state.replace_columns(columns(&["DOMEIN", "N"]));
        assert_eq!(state.column_for(SemanticLabel::Sector), None);
        assert_eq!(state.status(SemanticLabel::Sector), LabelStatus::Stale);
        assert!(state.choice(SemanticLabel::Sector).is_some());

        state.replace_columns(columns(&["SECTOR_OUD"]));
        assert_eq!(state.column_for(SemanticLabel::Sector), Some("SECTOR_OUD"));
    }

    #[test]
    fn unset_overrides_suggestion_until_cleared() {
        let mut state = MappingState::new(columns(&["regio"]));
        state.unset(SemanticLabel::Regio);
        assert_eq!(state.column_for(SemanticLabel::Regio), None);

        assert!(state.clear_choice(SemanticLabel::Regio));
        assert_eq!(state.column_for(SemanticLabel::Regio), Some("regio"));
    }

    #[test]
    fn summary_counts_statuses() {
        let mut state = MappingState::new(columns(&["aantal", "sector", "x"]));
        state.choose(SemanticLabel::DoorstroomIndicator, "x");
        state.choose(SemanticLabel::Regio, "weg");
        let summary = state.summary();
        assert_eq!(summary.total_labels, 10);
        assert_eq!(summary.chosen, 1);
        assert_eq!(summary.suggested, 2);
        assert_eq!(summary.stale, 1);
        assert_eq!(summary.unmapped, 6);
    }
}
