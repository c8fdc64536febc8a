//! Storage layer: where field values come from and where reports go.
//!
//! Holds the CSV and PostgreSQL value sources plus the report writers.

use thiserror::Error;

pub mod csv_source;
pub mod models;
pub mod postgres;
pub mod report;

pub use csv_source::CsvSource;
pub use models::{Field, FlagRecord, RawValue};
pub use postgres::{connect, server_time, PostgresSource};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("column '{column}' not found in {path}")]
    MissingColumn { column: String, path: String },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A collaborator that yields the raw values of one field for a batch run.
#[async_trait::async_trait]
pub trait ValueSource: Send + Sync {
    async fn fetch_values(&self) -> Result<Vec<RawValue>, SourceError>;

    /// Short human-readable origin used in log lines.
    fn describe(&self) -> String;
}
