//! `oreganizer` binary.
//!
//! Reads a recipe catalog, a set of goals, and an optional starting
//! inventory, plans the goals, and prints what will be crafted, consumed,
//! and left over, and what has to be gathered by hand.
//!
//! # Startup Sequence
//!
//! 1. Parse arguments
//! 2. Load configuration (defaults when the file is missing)
//! 3. Initialize structured logging (tracing) on stderr
//! 4. Load and compile the inputs
//! 5. Plan, verify conservation, and print the report on stdout

mod args;
mod error;
mod render;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use oreganizer_core::config::{LogFormat, LoggingConfig};
use oreganizer_core::{OreganizerConfig, PlanInput, ReportFormat};
use oreganizer_ledger::ConservationResult;

use crate::args::Cli;
use crate::error::CliError;
use crate::render::{TextReport, render_json};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut config = OreganizerConfig::load_or_default(&cli.config)?;
    if let Some(format) = cli.format {
        config.report.format = format.into();
    }
    config.report.show_trace |= cli.trace;

    init_logging(&config.logging, cli.verbosity_filter());
    info!(
        config = %cli.config.display(),
        format = ?config.report.format,
        "oreganizer starting"
    );

    let input = PlanInput::load(&cli.catalog, &cli.goals, cli.inventory.as_deref())?;
    let catalog = input.compile_catalog()?;
    let plan = oreganizer_core::plan(&catalog, &input.goals, &input.inventory)?;

    match config.report.format {
        ReportFormat::Text => {
            let report = TextReport {
                catalog: &catalog,
                goals: &input.goals,
                inventory: &input.inventory,
                plan: &plan,
                show_trace: config.report.show_trace,
            };
            print!("{report}");
        }
        ReportFormat::Json => println!("{}", render_json(&plan)?),
    }

    if config.report.verify_conservation {
        if let ConservationResult::Anomaly(anomaly) = plan.verify_conservation() {
            return Err(CliError::Conservation { anomaly });
        }
    }
    Ok(())
}

/// Install the global subscriber. `-v` flags win over `RUST_LOG`, which
/// wins over the configured level.
fn init_logging(logging: &LoggingConfig, forced: Option<&str>) {
    let filter = forced.map_or_else(
        || {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()))
        },
        EnvFilter::new,
    );

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match logging.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
