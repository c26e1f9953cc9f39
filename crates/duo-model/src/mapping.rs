//! Label-to-column mapping.
//!
//! A [`ColumnMapping`] holds at most one source column per [`SemanticLabel`].
//! It is only meaningful relative to a loaded dataset: a mapped column may not
//! exist in the dataset currently loaded, so readers validate existence with
//! [`ColumnMapping::column_if`] every time they use an entry.

use serde::{Deserialize, Serialize};

use crate::label::SemanticLabel;

/// One optional source column per semantic label.
///
/// Serializes as a flat JSON object keyed by label key, which is also the
/// format of mapping files:
///
/// ```json
/// { "aantal_studenten": "AANTAL", "sector": "SECTOR_NAAM" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMapping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instroomjaar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aantal_studenten: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doorstroom_indicator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brin_mbo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brin_hbo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub niveau_mbo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opleiding_mbo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opleiding_hbo: Option<String>,
}

impl ColumnMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, label: SemanticLabel, column: impl Into<String>) -> Self {
        self.set(label, Some(column.into()));
        self
    }

    /// Returns the mapped column name, whether or not it exists anywhere.
    #[must_use]
    pub fn get(&self, label: SemanticLabel) -> Option<&str> {
        self.slot(label).as_deref()
    }

    /// Sets or clears the column for a label.
    pub fn set(&mut self, label: SemanticLabel, column: Option<String>) {
        *self.slot_mut(label) = column;
    }

    /// Returns the mapped column only when `exists` accepts it.
    ///
    /// This is the read path every consumer goes through: a stale entry that
    /// names a column missing from the current dataset reads as unset.
    pub fn column_if(&self, label: SemanticLabel, exists: impl Fn(&str) -> bool) -> Option<&str> {
        self.get(label)
            .filter(|column| !column.is_empty() && exists(column))
    }

    /// Iterates all labels in catalog order with their mapped column.
    pub fn iter(&self) -> impl Iterator<Item = (SemanticLabel, Option<&str>)> + '_ {
        SemanticLabel::ALL
            .into_iter()
            .map(move |label| (label, self.get(label)))
    }

    /// Number of labels with a column.
    #[must_use]
    pub fn mapped_count(&self) -> usize {
        self.iter().filter(|(_, column)| column.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mapped_count() == 0
    }

    fn slot(&self, label: SemanticLabel) -> &Option<String> {
        match label {
            SemanticLabel::Instroomjaar => &self.instroomjaar,
            SemanticLabel::AantalStudenten => &self.aantal_studenten,
            SemanticLabel::Sector => &self.sector,
            SemanticLabel::Regio => &self.regio,
            SemanticLabel::DoorstroomIndicator => &self.doorstroom_indicator,
            SemanticLabel::BrinMbo => &self.brin_mbo,
            SemanticLabel::BrinHbo => &self.brin_hbo,
            SemanticLabel::NiveauMbo => &self.niveau_mbo,
            SemanticLabel::OpleidingMbo => &self.opleiding_mbo,
            SemanticLabel::OpleidingHbo => &self.opleiding_hbo,
        }
    }

    fn slot_mut(&mut self, label: SemanticLabel) -> &mut Option<String> {
        match label {
            SemanticLabel::Instroomjaar => &mut self.instroomjaar,
            SemanticLabel::AantalStudenten => &mut self.aantal_studenten,
            SemanticLabel::Sector => &mut self.sector,
            SemanticLabel::Regio => &mut self.regio,
            SemanticLabel::DoorstroomIndicator => &mut self.doorstroom_indicator,
            SemanticLabel::BrinMbo => &mut self.brin_mbo,
            SemanticLabel::BrinHbo => &mut self.brin_hbo,
            SemanticLabel::NiveauMbo => &mut self.niveau_mbo,
            SemanticLabel::OpleidingMbo => &mut self.opleiding_mbo,
            SemanticLabel::OpleidingHbo => &mut self.opleiding_hbo,
        }
    }
}
