//! Key figures: the transition rate and distribution overview.

use anyhow::Result;
use duo_model::{ColumnMapping, RateTable, SemanticLabel, ShareTable};
use serde::Serialize;
use tracing::info;

use crate::session::Session;

/// One section of the overview. `table` is `None` when the section cannot be
/// computed with the current mapping and data; `guidance` says what to map.
#[derive(Debug, Clone, Serialize)]
pub struct Section<T> {
    pub title: &'static str,
    pub table: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
}

impl<T> Section<T> {
    fn new(title: &'static str, table: Option<T>, guidance: impl FnOnce() -> String) -> Self {
        let guidance = table.is_none().then(guidance);
        Self {
            title,
            table,
            guidance,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct KpiReport {
    pub overall_rate: Section<RateTable>,
    pub rate_by_sector: Section<RateTable>,
    pub rate_by_regio: Section<RateTable>,
    pub share_by_sector: Section<ShareTable>,
    pub share_by_regio: Section<ShareTable>,
}

/// Builds the overview over the session's filtered dataset.
///
/// # Errors
///
/// Fails without a dataset, or when the strict indicator policy rejects a
/// cell. Sections that merely lack a mapping come back empty with guidance.
pub fn build_kpi_report(session: &Session) -> Result<KpiReport> {
    let mapping = session.resolved_mapping();
    let grouping = |label: SemanticLabel| -> Result<Option<RateTable>> {
        if mapping.get(label).is_none() {
            return Ok(None);
        }
        session.rate(&[label])
    };

    let report = KpiReport {
        overall_rate: Section::new("Overall transition rate", session.rate(&[])?, || {
            measure_guidance(&mapping, true).unwrap_or_else(|| ZERO_TOTAL.to_string())
        }),
        rate_by_sector: Section::new(
            "Transition rate per sector",
            grouping(SemanticLabel::Sector)?,
            || rate_guidance(&mapping, SemanticLabel::Sector),
        ),
        rate_by_regio: Section::new(
            "Transition rate per region",
            grouping(SemanticLabel::Regio)?,
            || rate_guidance(&mapping, SemanticLabel::Regio),
        ),
        share_by_sector: Section::new(
            "Share per sector",
            session.share(SemanticLabel::Sector)?,
            || share_guidance(&mapping, SemanticLabel::Sector),
        ),
        share_by_regio: Section::new(
            "Share per region",
            session.share(SemanticLabel::Regio)?,
            || share_guidance(&mapping, SemanticLabel::Regio),
        ),
    };
    info!(
        computed = report.computed_sections(),
        "key figures computed"
    );
    Ok(report)
}

impl KpiReport {
    /// Number of sections that produced a table.
    #[must_use]
    pub fn computed_sections(&self) -> usize {
        [
            self.overall_rate.table.is_some(),
            self.rate_by_sector.table.is_some(),
            self.rate_by_regio.table.is_some(),
            self.share_by_sector.table.is_some(),
            self.share_by_regio.table.is_some(),
        ]
        .into_iter()
        .filter(|computed| *computed)
        .count()
    }
}

const ZERO_TOTAL: &str = "the total student count is zero for the current selection";

/// What to map before the counts (and, for rates, the indicator) can be read.
fn measure_guidance(mapping: &ColumnMapping, needs_indicator: bool) -> Option<String> {
    let weight = SemanticLabel::AantalStudenten;
    let indicator = SemanticLabel::DoorstroomIndicator;
    match (
        mapping.get(weight).is_some(),
        !needs_indicator || mapping.get(indicator).is_some(),
    ) {
        (true, true) => None,
        (false, true) => Some(format!("map '{weight}' to compute this figure")),
        (true, false) => Some(format!("map '{indicator}' to compute this figure")),
        (false, false) => Some(format!("map '{indicator}' and '{weight}' to compute this figure")),
    }
}

fn rate_guidance(mapping: &ColumnMapping, label: SemanticLabel) -> String {
    if mapping.get(label).is_none() {
        return format!("map a column to '{label}' first");
    }
    measure_guidance(mapping, true).unwrap_or_else(|| {
        format!("could not compute a transition rate per {label} (check the mapping and data)")
    })
}

fn share_guidance(mapping: &ColumnMapping, label: SemanticLabel) -> String {
    if mapping.get(label).is_none() {
        return format!("map a column to '{label}' first");
    }
    measure_guidance(mapping, false)
        .unwrap_or_else(|| format!("{ZERO_TOTAL}; no shares per {label}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use duo_model::GroupKey;
    use polars::prelude::*;

    #[test]
    fn missing_region_column_only_empties_region_sections() {
        let mut session = Session::default();
        session.set_dataset(
            df!(
                "sector" => ["zorg", "zorg", "ict"],
                "aantal" => [10i64, 10, 5],
                "doorstroom_indicator" => [1i64, 0, 1],
            )
            .unwrap(),
        );
        let report = build_kpi_report(&session).unwrap();
        assert_eq!(report.computed_sections(), 3);
        let sector = report.rate_by_sector.table.as_ref().unwrap();
        assert_eq!(sector.percentage_for(&GroupKey::single("zorg")), Some(50.0));
        assert!(report.rate_by_regio.table.is_none());
        assert_eq!(
            report.share_by_regio.guidance.as_deref(),
            Some("map a column to 'regio' first")
        );
        assert!(report.share_by_sector.guidance.is_none());
    }

    #[test]
    fn zero_counts_are_reported_as_zero_not_as_unmapped() {
        let mut session = Session::default();
        session.set_dataset(
            df!(
                "sector" => ["zorg", "ict"],
                "aantal" => [0i64, 0],
                "doorstroom_indicator" => [1i64, 0],
            )
            .unwrap(),
        );
        let report = build_kpi_report(&session).unwrap();
        assert!(report.overall_rate.table.is_none());
        assert!(report.share_by_sector.table.is_none());
        assert_eq!(
            report.overall_rate.guidance.as_deref(),
            Some("the total student count is zero for the current selection")
        );
        assert_eq!(
            report.share_by_sector.guidance.as_deref(),
            Some("the total student count is zero for the current selection; no shares per sector")
        );
    }

    #[test]
    fn unmapped_counts_ask_for_the_count_column() {
        let mut session = Session::default();
        session.set_dataset(
            df!(
                "sector" => ["zorg", "ict"],
                "doorstroom_indicator" => [1i64, 0],
            )
            .unwrap(),
        );
        let report = build_kpi_report(&session).unwrap();
        assert_eq!(
            report.share_by_sector.guidance.as_deref(),
            Some("map 'aantal_studenten' to compute this figure")
        );
        assert_eq!(
            report.rate_by_sector.guidance.as_deref(),
            Some("map 'aantal_studenten' to compute this figure")
        );
    }
}
