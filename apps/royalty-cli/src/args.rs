//! # Command-Line Arguments
//!
//! ```text
//! royalty [--records <PATH>] [--json] <COMMAND> [OPTIONS]
//!
//! compute   --order <FILE>
//! quote     --book <ID> --person <ID> --entry <FILE> [--with-history]
//! statement --book <ID> [--person <ID>]
//! validate  --order <FILE>
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// A parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "royalty")]
#[command(about = "Royalty Desk: publishing royalty calculator")]
#[command(
    after_help = "Environment:\n  ROYALTY_RECORDS_PATH       Records file\n  ROYALTY_PUBLISHER_NAME     Statement header\n  ROYALTY_CURRENCY_SYMBOL    Currency symbol\n  ROYALTY_CURRENCY_DECIMALS  Decimal places (0-4)"
)]
pub struct Cli {
    /// Records file (default: $ROYALTY_RECORDS_PATH or the platform data dir)
    #[arg(short = 'r', long, global = true, value_name = "PATH")]
    pub records: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Validate and compute a publishing order
    Compute {
        #[arg(long, value_name = "FILE")]
        order: PathBuf,
    },
    /// Compute an order for a stored book and person
    Quote {
        #[arg(long, value_name = "ID")]
        book: String,
        #[arg(long, value_name = "ID")]
        person: String,
        #[arg(long, value_name = "FILE")]
        entry: PathBuf,
        /// Include the book's statement with this order appended
        #[arg(long, action = ArgAction::SetTrue)]
        with_history: bool,
    },
    /// Royalty statement for every record of a book
    Statement {
        #[arg(long, value_name = "ID")]
        book: String,
        #[arg(long, value_name = "ID")]
        person: Option<String>,
    },
    /// List every field-level problem in an order
    Validate {
        #[arg(long, value_name = "FILE")]
        order: PathBuf,
    },
}
