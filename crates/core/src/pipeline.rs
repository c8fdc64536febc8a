//! Batch driver: classify every value of one field and aggregate the result.

use crate::classifier::Classifiers;
use crate::models::FlagSummary;
use crate::normalize::normalize;
use anyhow::Context;
use serde::Serialize;
use storage::report::{self, OutputFormat, ReportPaths};
use storage::{Field, FlagRecord, RawValue, ValueSource};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub field: Field,
    /// Every input row in input order, clean rows included.
    pub records: Vec<FlagRecord>,
    pub summary: FlagSummary,
}

impl Report {
    pub fn flagged(&self) -> impl Iterator<Item = &FlagRecord> {
        self.records.iter().filter(|r| r.is_flagged())
    }

    pub fn flagged_count(&self) -> usize {
        self.summary.total()
    }

    pub fn write(&self, dir: &Path, format: OutputFormat) -> anyhow::Result<ReportPaths> {
        report::write_reports(dir, self.field, &self.records, format)
            .with_context(|| format!("writing {} reports to {}", self.field, dir.display()))
    }
}

pub fn run_batch(field: Field, rows: Vec<RawValue>, classifiers: &Classifiers) -> Report {
    let mut summary = FlagSummary::default();
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let (flag, reason) = classifiers.classify_field(field, &row.value);
        if !flag.is_empty() {
            debug!(value = %row.value, flag, %reason, "flagged");
        }
        summary.record(flag);
        records.push(FlagRecord {
            normalized: normalize(&row.value),
            value: row.value,
            flag: flag.to_string(),
            reason,
            lead_ids: row.lead_ids,
        });
    }

    info!(
        %field,
        total = records.len(),
        flagged = summary.total(),
        "classification complete"
    );
    Report {
        field,
        records,
        summary,
    }
}

pub async fn run_from_source(
    field: Field,
    source: &dyn ValueSource,
    classifiers: &Classifiers,
) -> anyhow::Result<Report> {
    info!(%field, source = %source.describe(), "loading values");
    let rows = source
        .fetch_values()
        .await
        .with_context(|| format!("loading {field} values from {}", source.describe()))?;
    Ok(run_batch(field, rows, classifiers))
}
