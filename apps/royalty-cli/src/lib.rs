//! # Royalty CLI Library
//!
//! Core library for the `royalty` command-line tool.
//! `run()` wires logging, configuration, argument parsing and output.
//!
//! ## Module Organization
//! ```text
//! royalty_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── args.rs         ◄─── clap argument definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Configuration state
//! │   └── records.rs  ◄─── Records file → MemorySource
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── compute.rs  ◄─── Validate + compute an order file
//! │   ├── quote.rs    ◄─── Order for a stored book and person
//! │   ├── statement.rs◄─── Per-book statement
//! │   └── validate.rs ◄─── Field-level violations
//! └── error.rs        ◄─── Error type and exit codes
//! ```

pub mod args;
pub mod commands;
pub mod error;
pub mod state;

use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::error::ErrorKind;
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use args::{Cli, Command};
use error::{AppError, ErrorCode};
use royalty_core::{OrderEntry, PublishingOrder};
use state::{load_records, ConfigState};

/// Runs the CLI and returns the process exit status.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                          CLI Startup                                    │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,royalty=debug; override with RUST_LOG               │
/// │                                                                         │
/// │  2. Parse Arguments ──────────────────────────────────────────────────► │
/// │     • clap; --help prints and exits 0, usage errors exit with 64        │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • ROYALTY_* environment, then --records                             │
/// │                                                                         │
/// │  4. Execute Command ──────────────────────────────────────────────────► │
/// │     • Records file is only read by quote and statement                  │
/// │     • stdout: text or JSON; stderr: logs and errors                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return ExitCode::SUCCESS;
            }
            _ => {
                if std::env::args().any(|a| a == "--json") {
                    return report(&AppError::from(err), true);
                }
                eprint!("{err}");
                return ExitCode::from(ErrorCode::UsageError.exit_code());
            }
        },
    };

    let mut config = ConfigState::from_env();
    if let Some(path) = &cli.records {
        config.records_path = path.clone();
    }
    debug!(?config, "configuration loaded");

    match execute(&cli, &config, Utc::now()) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => report(&err, cli.json),
    }
}

/// Executes a parsed command and returns what goes to stdout.
///
/// `now` stamps statements; passing it in keeps this testable.
pub fn execute(cli: &Cli, config: &ConfigState, now: DateTime<Utc>) -> Result<String, AppError> {
    info!(command = ?cli.command, "executing");

    match &cli.command {
        Command::Compute { order } => {
            let order: PublishingOrder = commands::read_json(order)?;
            let response = commands::compute::compute_order(&order)?;
            output(cli.json, &response, |r| r.render_text(config))
        }
        Command::Validate { order } => {
            let order: PublishingOrder = commands::read_json(order)?;
            let response = commands::validate::validate(&order);
            output(cli.json, &response, |r| r.render_text())
        }
        Command::Quote {
            book,
            person,
            entry,
            with_history,
        } => {
            let entry: OrderEntry = commands::read_json(entry)?;
            let source = load_records(&config.records_path)?;
            let response =
                commands::quote::quote(&source, book, person, &entry, *with_history, now)?;
            output(cli.json, &response, |r| r.render_text(config))
        }
        Command::Statement { book, person } => {
            let source = load_records(&config.records_path)?;
            let response =
                commands::statement::statement(&source, book, person.as_deref(), now)?;
            output(cli.json, &response, |r| r.render_text(config))
        }
    }
}

fn output<T, F>(json: bool, response: &T, text: F) -> Result<String, AppError>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    if !json {
        return Ok(text(response));
    }
    serde_json::to_string_pretty(response)
        .map(|mut s| {
            s.push('\n');
            s
        })
        .map_err(|e| AppError::new(ErrorCode::ParseError, format!("Cannot encode output: {}", e)))
}

/// Prints an error to stderr and maps it to an exit status.
fn report(err: &AppError, json: bool) -> ExitCode {
    if json {
        match serde_json::to_string(err) {
            Ok(s) => eprintln!("{}", s),
            Err(_) => eprintln!("{}", err),
        }
    } else {
        eprintln!("{}", err);
    }
    ExitCode::from(err.code.exit_code())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=royalty=trace` - Show trace for royalty crates only
/// - Default: `info,royalty=debug`
///
/// Logs go to stderr so stdout stays machine-readable with `--json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,royalty=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
