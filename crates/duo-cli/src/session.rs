//! One user's working state: the loaded dataset and its label mapping.

use std::path::Path;

use anyhow::{Context, Result};
use duo_aggregate::{
    AggregateOptions, LabelFilter, apply_filters, grouped_totals, share_of_total, weighted_rate,
};
use duo_ingest::{DatasetProfile, LoadOptions, profile_dataset, read_dataset};
use duo_map::{LabelStatus, MappingState};
use duo_model::{ColumnMapping, RateTable, SemanticLabel, ShareTable, TotalsTable};
use polars::prelude::DataFrame;
use tracing::{debug, error};

use crate::logging::redact_value;

/// A loaded dataset plus the mapping and filters applied to it.
///
/// Aggregations always read the mapping resolved against the current
/// columns, so choices carried over from an earlier dataset never point at
/// columns that are not there.
#[derive(Debug, Default)]
pub struct Session {
    dataset: Option<DataFrame>,
    mapping: MappingState,
    filters: Vec<LabelFilter>,
    options: AggregateOptions,
}

impl Session {
    #[must_use]
    pub fn new(options: AggregateOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Loads a dataset from disk, replacing the current one.
    ///
    /// On failure the session is left without a dataset and without
    /// columns, so no label resolves until the next successful load.
    /// Explicit choices are kept.
    pub fn load(&mut self, path: &Path, options: &LoadOptions) -> Result<()> {
        match read_dataset(path, options) {
            Ok(df) => {
                self.set_dataset(df);
                Ok(())
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "dataset load failed");
                self.dataset = None;
                self.mapping.replace_columns(Vec::new());
                Err(err).with_context(|| format!("load {}", path.display()))
            }
        }
    }

    /// Installs an already loaded dataset.
    pub fn set_dataset(&mut self, df: DataFrame) {
        let columns = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        self.mapping.replace_columns(columns);
        self.dataset = Some(df);
    }

    #[must_use]
    pub fn dataset(&self) -> Option<&DataFrame> {
        self.dataset.as_ref()
    }

    #[must_use]
    pub fn mapping(&self) -> &MappingState {
        &self.mapping
    }

    pub fn mapping_mut(&mut self) -> &mut MappingState {
        &mut self.mapping
    }

    /// Mapping resolved against the current columns.
    #[must_use]
    pub fn resolved_mapping(&self) -> ColumnMapping {
        self.mapping.resolved()
    }

    /// Label, resolved column and where it came from, in catalog order.
    #[must_use]
    pub fn mapping_report(&self) -> Vec<(SemanticLabel, Option<String>, LabelStatus)> {
        SemanticLabel::ALL
            .iter()
            .map(|&label| {
                (
                    label,
                    self.mapping.column_for(label).map(str::to_string),
                    self.mapping.status(label),
                )
            })
            .collect()
    }

    pub fn set_filters(&mut self, filters: Vec<LabelFilter>) {
        for filter in &filters {
            debug!(
                label = %filter.label,
                values = %redact_value(&filter.values.join(",")),
                "filter set"
            );
        }
        self.filters = filters;
    }

    #[must_use]
    pub fn filters(&self) -> &[LabelFilter] {
        &self.filters
    }

    #[must_use]
    pub fn options(&self) -> AggregateOptions {
        self.options
    }

    #[must_use]
    pub fn profile(&self) -> Option<DatasetProfile> {
        self.dataset.as_ref().map(profile_dataset)
    }

    /// The dataset after the session filters.
    pub fn filtered(&self) -> Result<DataFrame> {
        let df = self.dataset.as_ref().context("no dataset loaded")?;
        let filtered = apply_filters(df, &self.resolved_mapping(), &self.filters)?;
        Ok(filtered)
    }

    pub fn rate(&self, group_labels: &[SemanticLabel]) -> Result<Option<RateTable>> {
        let df = self.filtered()?;
        let table = weighted_rate(&df, &self.resolved_mapping(), group_labels, &self.options)?;
        Ok(table)
    }

    pub fn share(&self, label: SemanticLabel) -> Result<Option<ShareTable>> {
        let df = self.filtered()?;
        Ok(share_of_total(&df, &self.resolved_mapping(), label)?)
    }

    pub fn totals(&self, labels: &[SemanticLabel]) -> Result<Option<TotalsTable>> {
        let df = self.filtered()?;
        Ok(grouped_totals(&df, &self.resolved_mapping(), labels)?)
    }
}
