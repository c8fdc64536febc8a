use anyhow::{Context, Result};
use flagger_core::config::AppConfig;
use flagger_core::pipeline::{self, Report};
use flagger_core::rules;
use flagger_core::Classifiers;
use std::path::{Path, PathBuf};
use storage::report::{OutputFormat, ReportPaths};
use storage::{CsvSource, Field, PostgresSource, ValueSource};
use tracing::info;

/// Command-line overrides for a flagging run; unset fields fall back to the config.
#[derive(Debug, Clone, Default)]
pub struct FlagOptions {
    pub input: Option<PathBuf>,
    pub column: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub rules: Option<PathBuf>,
}

pub struct FlagOutcome {
    pub report: Report,
    pub paths: ReportPaths,
}

pub async fn flag_field(cfg: &AppConfig, field: Field, opts: &FlagOptions) -> Result<FlagOutcome> {
    let rules_path = opts
        .rules
        .clone()
        .or_else(|| cfg.rules.path.as_ref().map(PathBuf::from));
    let rule_set = rules::load_rules(rules_path.as_deref())?;
    let classifiers = Classifiers::from_rules(rule_set);

    let source = build_source(cfg, field, opts).await?;
    let report = pipeline::run_from_source(field, source.as_ref(), &classifiers).await?;

    let dir = opts
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.output.dir));
    let format = opts.format.unwrap_or(cfg.output.format);
    let paths = report.write(&dir, format)?;
    Ok(FlagOutcome { report, paths })
}

async fn build_source(
    cfg: &AppConfig,
    field: Field,
    opts: &FlagOptions,
) -> Result<Box<dyn ValueSource>> {
    let configured = cfg.input.for_field(field);
    let csv_path = opts
        .input
        .clone()
        .or_else(|| configured.csv.as_ref().map(PathBuf::from));

    if let Some(path) = csv_path {
        let column = opts
            .column
            .clone()
            .unwrap_or_else(|| configured.column_or(field));
        return Ok(Box::new(CsvSource::new(path, column)));
    }

    let url = cfg.database.resolve_url()?;
    let pool = storage::connect(&url).await.context("db connect")?;
    Ok(Box::new(PostgresSource::new(pool, field)))
}

/// Outcome of a connection check. Failure is a reportable state, not an error.
pub enum DbCheck {
    Connected(String),
    Failed(String),
}

pub async fn check_db(cfg: &AppConfig) -> DbCheck {
    let attempt = async {
        let url = cfg.database.resolve_url()?;
        let pool = storage::connect(&url).await?;
        let now = storage::server_time(&pool).await?;
        anyhow::Ok(now.to_rfc3339())
    };
    match attempt.await {
        Ok(ts) => DbCheck::Connected(ts),
        Err(e) => DbCheck::Failed(format!("{e:#}")),
    }
}

/// Pulls distinct values of `field` from the database into a CSV the flagger can read back.
pub async fn export_field(cfg: &AppConfig, field: Field, output: &Path) -> Result<usize> {
    let url = cfg.database.resolve_url()?;
    let pool = storage::connect(&url).await.context("db connect")?;
    let values = PostgresSource::new(pool, field).fetch_values().await?;
    storage::report::export_values(output, field, &values)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(%field, rows = values.len(), path = %output.display(), "export complete");
    Ok(values.len())
}

pub fn default_export_path(field: Field) -> PathBuf {
    PathBuf::from(format!("unique_{}.csv", field.column()))
}
