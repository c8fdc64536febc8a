use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use flagger_cli::commands::{self, DbCheck, FlagOptions};
use flagger_cli::output;
use flagger_core::config::{self, AppConfig};
use std::path::PathBuf;
use storage::report::OutputFormat;
use storage::Field;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Industry(args) => run_flag(cfg, Field::Industry, args).await,
        Commands::City(args) => run_flag(cfg, Field::City, args).await,
        Commands::CheckDb => {
            match commands::check_db(&cfg).await {
                DbCheck::Connected(ts) => println!("Connected successfully at: {ts}"),
                DbCheck::Failed(err) => println!("Connection failed: {err}"),
            }
            Ok(())
        }
        Commands::Export { field, output } => {
            let field = Field::from(field);
            let path = output.unwrap_or_else(|| commands::default_export_path(field));
            let rows = commands::export_field(&cfg, field, &path).await?;
            println!("Unique {field} saved to {} ({rows} rows)", path.display());
            Ok(())
        }
    }
}

#[derive(Parser)]
#[command(name = "lead-flagger")]
#[command(about = "Flags suspicious industry and city values in lead data", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify industry values
    Industry(FlagArgs),
    /// Classify city values
    City(FlagArgs),
    /// Test the database connection
    CheckDb,
    /// Export distinct values of a field from the database to CSV
    Export {
        #[arg(value_enum)]
        field: FieldArg,
        /// Output CSV path (default: unique_<field>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct FlagArgs {
    /// Read values from this CSV instead of the database
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Value column header in the CSV (default: field name)
    #[arg(long)]
    column: Option<String>,
    /// Directory for the report files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    /// Report file format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Rule table overrides (TOML)
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Output JSON summary
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldArg {
    Industry,
    City,
}

impl From<FieldArg> for Field {
    fn from(f: FieldArg) -> Self {
        match f {
            FieldArg::Industry => Field::Industry,
            FieldArg::City => Field::City,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

async fn run_flag(cfg: AppConfig, field: Field, args: FlagArgs) -> Result<()> {
    let opts = FlagOptions {
        input: args.input,
        column: args.column,
        output_dir: args.output_dir,
        format: args.format.map(OutputFormat::from),
        rules: args.rules,
    };
    let outcome = commands::flag_field(&cfg, field, &opts).await?;

    if args.json {
        let summary = output::summary_json(&outcome.report, &outcome.paths);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", output::flagged_table(&outcome.report));
        println!();
        print!("{}", output::summary_lines(&outcome.report.summary));
        println!(
            "{}: {} values, {} flagged; wrote {} and {}",
            field,
            outcome.report.records.len(),
            outcome.report.flagged_count(),
            outcome.paths.all.display(),
            outcome.paths.flagged.display()
        );
    }
    Ok(())
}
