//! The fixed catalog of semantic labels.
//!
//! A label is a logical role (year, count, sector, ...) that a user matches
//! to one concrete column of an uploaded dataset. The catalog is closed and
//! its order is the order labels are presented in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A semantic role a dataset column can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticLabel {
    /// Year of intake / cohort.
    Instroomjaar,
    /// Number of students in the row; the weight of every aggregation.
    AantalStudenten,
    /// Sector or education domain.
    Sector,
    /// Region or labour-market region.
    Regio,
    /// Flag telling whether the students transitioned from mbo to hbo.
    DoorstroomIndicator,
    /// Institution code of the mbo school.
    BrinMbo,
    /// Institution code of the hbo school.
    BrinHbo,
    /// Mbo level (2, 3, 4).
    NiveauMbo,
    /// Mbo programme.
    OpleidingMbo,
    /// Hbo programme.
    OpleidingHbo,
}

impl SemanticLabel {
    /// Every label, in catalog order.
    pub const ALL: [SemanticLabel; 10] = [
        SemanticLabel::Instroomjaar,
        SemanticLabel::AantalStudenten,
        SemanticLabel::Sector,
        SemanticLabel::Regio,
        SemanticLabel::DoorstroomIndicator,
        SemanticLabel::BrinMbo,
        SemanticLabel::BrinHbo,
        SemanticLabel::NiveauMbo,
        SemanticLabel::OpleidingMbo,
        SemanticLabel::OpleidingHbo,
    ];

    /// Stable key used in mapping files, CLI flags and output headers.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Instroomjaar => "instroomjaar",
            Self::AantalStudenten => "aantal_studenten",
            Self::Sector => "sector",
            Self::Regio => "regio",
            Self::DoorstroomIndicator => "doorstroom_indicator",
            Self::BrinMbo => "brin_mbo",
            Self::BrinHbo => "brin_hbo",
            Self::NiveauMbo => "niveau_mbo",
            Self::OpleidingMbo => "opleiding_mbo",
            Self::OpleidingHbo => "opleiding_hbo",
        }
    }

    /// Human-readable description shown next to the label.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Instroomjaar => "Year of intake / cohort (e.g. 2022-2023)",
            Self::AantalStudenten => "Number of students / count in the group",
            Self::Sector => "Sector / education domain (e.g. techniek, zorg, economie)",
            Self::Regio => "Region or labour-market region",
            Self::DoorstroomIndicator => "Mbo-hbo transition indicator (0/1 or True/False)",
            Self::BrinMbo => "BRIN code of the mbo institution",
            Self::BrinHbo => "BRIN code of the hbo institution",
            Self::NiveauMbo => "Mbo level (e.g. 2, 3, 4)",
            Self::OpleidingMbo => "Mbo programme",
            Self::OpleidingHbo => "Hbo programme",
        }
    }

    /// Looks a label up by key, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|label| label.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for SemanticLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SemanticLabel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| ModelError::UnknownLabel(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_str() {
        for label in SemanticLabel::ALL {
            assert_eq!(label.key().parse::<SemanticLabel>(), Ok(label));
        }
    }

    #[test]
    fn from_key_ignores_case() {
        assert_eq!(
            SemanticLabel::from_key(" Aantal_Studenten "),
            Some(SemanticLabel::AantalStudenten)
        );
        assert_eq!(SemanticLabel::from_key("leeftijd"), None);
    }

    #[test]
    fn unknown_label_error_names_the_key() {
        let err = "leeftijd".parse::<SemanticLabel>().unwrap_err();
        assert_eq!(err, ModelError::UnknownLabel("leeftijd".to_string()));
    }

    #[test]
    fn serde_uses_snake_case_keys() {
        let json = serde_json::to_string(&SemanticLabel::DoorstroomIndicator).unwrap();
        assert_eq!(json, "\"doorstroom_indicator\"");
    }
}
