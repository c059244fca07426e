//! `slots`: print the bookable start times of a service on a date.
//!
//! Reads a service schedule (JSON) from a file or stdin:
//!
//! ```json
//! {
//!   "name": "Haircut",
//!   "window": { "start": "09:00", "end": "12:00" },
//!   "duration": 30,
//!   "units": [
//!     { "id": "anna", "appointments": [
//!       { "date": "2026-03-15", "start": "10:00", "end": "10:30" }
//!     ] }
//!   ]
//! }
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use slot_engine::{
    compute_schedule, compute_schedule_par, parse_request_date, AvailabilityResult,
    ServiceSchedule,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "slots", version, about = "Available appointment start times for a service")]
struct Cli {
    /// Service schedule JSON file (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Requested date, dd-MM-yyyy
    #[arg(short, long)]
    date: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Spread per-unit work over all cores
    #[arg(long)]
    parallel: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// JSON array of "HH:MM" strings
    Json,
    /// One "HH:MM" per line
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let raw = read_input(cli.input.as_ref())?;
    let service: ServiceSchedule =
        serde_json::from_str(&raw).context("Failed to parse service schedule JSON")?;
    let date = parse_request_date(&cli.date)?;

    let result = if cli.parallel {
        compute_schedule_par(&service, date)?
    } else {
        compute_schedule(&service, date)?
    };
    tracing::info!(date = %cli.date, available = result.len(), "schedule computed");

    print!("{}", render(&result, cli.format)?);
    Ok(())
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "slot_engine=debug,slot_engine_cli=debug"
    } else {
        "slot_engine=info,slot_engine_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(p) => fs::read_to_string(p)
            .with_context(|| format!("Failed to read input file: {}", p.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn render(result: &AvailabilityResult, format: Format) -> Result<String> {
    Ok(match format {
        Format::Json => {
            let mut out = serde_json::to_string(result).context("Failed to serialize result")?;
            out.push('\n');
            out
        }
        Format::Text => result
            .formatted()
            .into_iter()
            .map(|t| t + "\n")
            .collect(),
    })
}
