//! CLI entry point for the trip harmonizer.
//!
//! Reads named source batches, runs the harmonization pipeline, and
//! writes the five canonical summary tables as CSV.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use trip_harmonizer::{
    ingest::read_batch,
    output::{print_json, write_table},
    pipeline::{ErrorPolicy, SourceBatch, harmonize},
    schema::SchemaId,
    summary::views::{DEFAULT_TOP_STATIONS, all_views},
    validate::default_rules,
};

#[derive(Parser)]
#[command(name = "trip_harmonizer")]
#[command(about = "Harmonize and summarize bike-share trip batches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Harmonize source batches and write the summary tables
    Summarize {
        /// Source batches as schema=path pairs, e.g. legacy=trips_2019_q1.csv
        #[arg(value_name = "SCHEMA=PATH", required = true)]
        batches: Vec<String>,

        /// Directory to write summary CSVs to
        #[arg(short, long, default_value = "summaries")]
        output_dir: String,

        /// Abort the whole run on the first malformed row
        #[arg(long, default_value_t = false)]
        strict: bool,

        /// Stations per rider class in the top-station view
        #[arg(long, default_value_t = DEFAULT_TOP_STATIONS)]
        top_stations: usize,

        /// Also log each table as pretty JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/trip_harmonizer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("trip_harmonizer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            batches,
            output_dir,
            strict,
            top_stations,
            json,
        } => {
            let mut source_batches = Vec::with_capacity(batches.len());
            for spec in &batches {
                let (schema, path) = parse_batch_spec(spec)?;
                let rows = read_batch(&path)?;
                info!(schema = schema.as_str(), path = %path.display(), rows = rows.len(), "Loaded source batch");
                source_batches.push(SourceBatch { schema, rows });
            }

            let policy = if strict {
                ErrorPolicy::Strict
            } else {
                ErrorPolicy::SkipAndLog
            };

            let cleaned = harmonize(source_batches, &default_rules(), policy)?;
            info!(records = cleaned.len(), "Harmonized cleaned record set");

            let out_dir = Path::new(&output_dir);
            for table in all_views(&cleaned, top_stations) {
                let path = write_table(out_dir, &table)?;
                info!(view = table.name, path = %path.display(), rows = table.rows.len(), "Wrote summary table");
                if json {
                    print_json(&table)?;
                }
            }
        }
    }

    Ok(())
}

/// Splits a `schema=path` batch argument.
fn parse_batch_spec(spec: &str) -> Result<(SchemaId, PathBuf)> {
    let Some((schema_name, path)) = spec.split_once('=') else {
        bail!("batch `{spec}` is not of the form SCHEMA=PATH");
    };
    let Some(schema) = SchemaId::parse(schema_name) else {
        bail!("unknown source schema `{schema_name}` (expected `current` or `legacy`)");
    };
    Ok((schema, PathBuf::from(path)))
}
