//! CLI entry point for the bikeshare statistics tool.
//!
//! Provides an interactive explorer, a one-shot report for scripting, and a
//! listing of the configured city data files.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bikeshare_stats::error::BikeshareError;
use bikeshare_stats::{
    Catalog, loader, output,
    prompt::Prompter,
    session::{Summary, explore, write_report},
};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory that relative city data files are resolved against
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// JSON file overriding the built-in city to data file mapping
    #[arg(long, env = "BIKESHARE_CITIES")]
    cities: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask for a city, month and day, then print statistics (default)
    Explore,
    /// Print statistics for one filter without prompting
    Report {
        /// City to analyze, e.g. "chicago" or "new york city"
        city: String,

        /// Month name, or "all"
        #[arg(short, long, default_value = "all")]
        month: String,

        /// Day of the week, or "all"
        #[arg(short, long, default_value = "all")]
        day: String,

        /// Print the statistics as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also write the filtered trips to this CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// List the configured cities and their data files
    ListCities,
}

/// Filter read from `var`, falling back to `default` when it is unset or empty.
fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
    filter_from(std::env::var(var).ok().as_deref(), default)
}

fn filter_from(directives: Option<&str>, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // stderr stays quiet by default so prompts remain readable
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", LevelFilter::WARN));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let catalog = match &cli.cities {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading city catalog {}", path.display()))?,
        None => Catalog::default(),
    }
    .with_data_dir(&cli.data_dir);

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let stdin = std::io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), std::io::stdout().lock());

            match explore(&catalog, &mut prompter) {
                Err(BikeshareError::InputClosed) => info!("Input closed, exiting"),
                other => other?,
            }
        }
        Commands::Report {
            city,
            month,
            day,
            json,
            export,
        } => {
            let filter = catalog.filter(&city, &month, &day)?;
            let dataset = loader::load(&catalog, &filter)?;
            let mut stdout = std::io::stdout().lock();

            if json {
                let summary = Summary::compute(&dataset, &catalog, &filter);
                output::print_json(&mut stdout, &summary)?;
            } else {
                writeln!(stdout, "{} trips match {}", dataset.len(), filter)?;
                write_report(&mut stdout, &dataset, &catalog)?;
            }

            if let Some(path) = export {
                output::write_records(&path, &dataset)
                    .with_context(|| format!("exporting trips to {}", path.display()))?;
                info!(path = %path.display(), rows = dataset.len(), "Trips exported");
            }
        }
        Commands::ListCities => {
            let mut stdout = std::io::stdout().lock();
            for (city, path) in catalog.sources() {
                let status = if path.exists() { "found" } else { "missing" };
                writeln!(stdout, "{city:<16} {status:<8} {}", path.display())?;
            }
        }
    }

    Ok(())
}
