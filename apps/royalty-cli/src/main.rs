//! # Royalty CLI Entry Point
//!
//! ```text
//! royalty compute   --order order.json
//! royalty quote     --book <ID> --person <ID> --entry entry.json [--with-history]
//! royalty statement --book <ID> [--person <ID>]
//! royalty validate  --order order.json
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    royalty_cli::run()
}
