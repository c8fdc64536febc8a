//! CSV value source: reads one column (plus optional lead ids) from a delimited file.

use crate::{RawValue, SourceError, ValueSource};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LEAD_IDS_COLUMN: &str = "lead_ids";

#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    column: String,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            column: column.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl ValueSource for CsvSource {
    async fn fetch_values(&self) -> Result<Vec<RawValue>, SourceError> {
        let file = File::open(&self.path)?;
        read_values(file, &self.column, &self.path.to_string_lossy())
    }

    fn describe(&self) -> String {
        format!("csv:{}#{}", self.path.display(), self.column)
    }
}

/// Reads `column` from every record. Short rows yield an empty value rather than an error.
pub fn read_values<R: Read>(
    reader: R,
    column: &str,
    origin: &str,
) -> Result<Vec<RawValue>, SourceError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();

    let value_idx = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| SourceError::MissingColumn {
            column: column.to_string(),
            path: origin.to_string(),
        })?;
    let ids_idx = headers.iter().position(|h| h == LEAD_IDS_COLUMN);

    let mut out = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let value = record.get(value_idx).unwrap_or("").to_string();
        let lead_ids = ids_idx
            .and_then(|idx| record.get(idx))
            .map(parse_lead_ids)
            .unwrap_or_default();
        out.push(RawValue { value, lead_ids });
    }
    debug!(rows = out.len(), origin, "read csv values");
    Ok(out)
}

/// Parses an aggregated id list: Postgres array text (`{a,b}`), a bracketed
/// list (`['a', 'b']`), or a bare comma-separated string.
pub fn parse_lead_ids(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .or_else(|| trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')))
        .unwrap_or(trimmed);

    inner
        .split(',')
        .map(|id| id.trim().trim_matches(|c: char| c == '\'' || c == '"').trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_named_column_and_ids() {
        let data = "city,lead_ids\nBoston,\"{l1,l2}\"\n,\"['l3']\"\n";
        let rows = read_values(data.as_bytes(), "city", "inline").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value, "Boston");
        assert_eq!(rows[0].lead_ids, vec!["l1", "l2"]);
        assert_eq!(rows[1].value, "");
        assert_eq!(rows[1].lead_ids, vec!["l3"]);
    }

    #[test]
    fn missing_column_is_reported() {
        let data = "industry\nSoftware\n";
        let err = read_values(data.as_bytes(), "city", "inline").unwrap_err();
        assert!(matches!(err, SourceError::MissingColumn { .. }));
    }

    #[test]
    fn short_rows_coerce_to_empty() {
        let data = "id,industry\n1\n2,Retail\n";
        let rows = read_values(data.as_bytes(), "industry", "inline").unwrap();
        assert_eq!(rows[0].value, "");
        assert_eq!(rows[1].value, "Retail");
        assert!(rows[1].lead_ids.is_empty());
    }

    #[test]
    fn lead_id_formats() {
        assert_eq!(parse_lead_ids("{a,b}"), vec!["a", "b"]);
        assert_eq!(parse_lead_ids("['a', \"b\"]"), vec!["a", "b"]);
        assert_eq!(parse_lead_ids("a, b"), vec!["a", "b"]);
        assert!(parse_lead_ids("{}").is_empty());
        assert!(parse_lead_ids("  ").is_empty());
    }
}
