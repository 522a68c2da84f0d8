//! # State Module
//!
//! Startup state for the CLI: configuration and the loaded records.
//!
//! ```text
//! ┌──────────────────┐      ┌──────────────────────────────┐
//! │   ConfigState    │      │   records (MemorySource)     │
//! │  publisher name  │      │  books, persons, records     │
//! │  currency        │      │  loaded lazily: only the     │
//! │  records path ───┼─────►│  commands that need it       │
//! └──────────────────┘      └──────────────────────────────┘
//! ```

mod config;
mod records;

pub use config::{ConfigState, RECORDS_FILE_NAME};
pub use records::{load_records, RecordsFile};
