//! Report writers for annotated and flagged-only views, plus the value export.

use crate::{Field, FlagRecord, RawValue, SourceError};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }
}

/// Paths of the two report files written for a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub all: PathBuf,
    pub flagged: PathBuf,
}

impl ReportPaths {
    pub fn in_dir(dir: &Path, field: Field, format: OutputFormat) -> Self {
        let ext = format.extension();
        Self {
            all: dir.join(format!(
                "all_{}_with_flags_and_reasons.{ext}",
                field.plural()
            )),
            flagged: dir.join(format!("flagged_{}_with_reason.{ext}", field.plural())),
        }
    }
}

/// Writes the full annotated set and the flagged-only subset into `dir`.
pub fn write_reports(
    dir: &Path,
    field: Field,
    records: &[FlagRecord],
    format: OutputFormat,
) -> Result<ReportPaths, SourceError> {
    fs::create_dir_all(dir)?;
    let paths = ReportPaths::in_dir(dir, field, format);
    let flagged: Vec<&FlagRecord> = records.iter().filter(|r| r.is_flagged()).collect();
    let all: Vec<&FlagRecord> = records.iter().collect();

    write_records(&paths.all, field, &all, format)?;
    write_records(&paths.flagged, field, &flagged, format)?;
    info!(
        all = %paths.all.display(),
        flagged = %paths.flagged.display(),
        rows = records.len(),
        flagged_rows = flagged.len(),
        "wrote reports"
    );
    Ok(paths)
}

fn write_records(
    path: &Path,
    field: Field,
    records: &[&FlagRecord],
    format: OutputFormat,
) -> Result<(), SourceError> {
    let file = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Csv => write_csv(file, field, records),
        OutputFormat::Json => {
            let mut file = file;
            serde_json::to_writer_pretty(&mut file, records)?;
            file.flush()?;
            Ok(())
        }
    }
}

/// Columns: `<field>`, `<field>_cleaned`, `lead_ids`, `flag`, `reason`.
pub fn write_csv<W: Write>(
    writer: W,
    field: Field,
    records: &[&FlagRecord],
) -> Result<(), SourceError> {
    let mut wtr = csv::Writer::from_writer(writer);
    let cleaned = format!("{}_cleaned", field.column());
    wtr.write_record([field.column(), cleaned.as_str(), "lead_ids", "flag", "reason"])?;
    for r in records {
        let ids = format_lead_ids(&r.lead_ids);
        wtr.write_record([
            r.value.as_str(),
            r.normalized.as_str(),
            ids.as_str(),
            r.flag.as_str(),
            r.reason.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Dumps source values in the layout the CSV source reads back.
pub fn export_values(path: &Path, field: Field, values: &[RawValue]) -> Result<(), SourceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record([field.column(), crate::csv_source::LEAD_IDS_COLUMN])?;
    for v in values {
        let ids = format_lead_ids(&v.lead_ids);
        wtr.write_record([v.value.as_str(), ids.as_str()])?;
    }
    wtr.flush()?;
    info!(path = %path.display(), rows = values.len(), "exported distinct values");
    Ok(())
}

fn format_lead_ids(ids: &[String]) -> String {
    if ids.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", ids.join(","))
    }
}
