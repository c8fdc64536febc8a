use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use storage::report::OutputFormat;
use storage::Field;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub rules: RuleConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL. When unset it is built from the environment.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub industry: SourceConfig,
    #[serde(default)]
    pub city: SourceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// CSV file holding the values; the database is used when absent.
    #[serde(default)]
    pub csv: Option<String>,
    /// Header of the value column, defaults to the field name.
    #[serde(default)]
    pub column: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: OutputFormat::default(),
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    pub path: Option<String>,
}

impl InputConfig {
    pub fn for_field(&self, field: Field) -> &SourceConfig {
        match field {
            Field::Industry => &self.industry,
            Field::City => &self.city,
        }
    }
}

impl SourceConfig {
    pub fn column_or(&self, field: Field) -> String {
        self.column
            .clone()
            .unwrap_or_else(|| field.column().to_string())
    }
}

impl DatabaseConfig {
    /// Configured URL, else `DATABASE_URL`, else assembled from `DB_USER`,
    /// `DB_PASSWORD`, `DB_HOST`, `DB_PORT` and `DB_NAME`.
    pub fn resolve_url(&self) -> anyhow::Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        url_from_env(|key| std::env::var(key).ok())
    }
}

pub fn url_from_env<F>(lookup: F) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
        return Ok(url);
    }
    let part = |key: &str| lookup(key).filter(|v| !v.is_empty());
    let (Some(user), Some(host), Some(name)) = (part("DB_USER"), part("DB_HOST"), part("DB_NAME"))
    else {
        bail!("database not configured: set DATABASE_URL or DB_USER, DB_HOST and DB_NAME");
    };
    let password = part("DB_PASSWORD").unwrap_or_default();
    let port = part("DB_PORT").unwrap_or_else(|| "5432".to_string());
    Ok(format!(
        "postgresql://{user}:{password}@{host}:{port}/{name}"
    ))
}

/// Loads `path` (or `config/default` if present), then `FLAGGER__*` environment overrides.
pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(config::Environment::with_prefix("FLAGGER").separator("__"));
    let cfg = settings.build().context("reading configuration")?;
    Ok(cfg.try_deserialize()?)
}
