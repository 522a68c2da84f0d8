//! # Commands Module
//!
//! Every command the CLI exposes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (shared helpers)
//! ├── compute.rs    ◄─── Validate + compute a full order
//! ├── quote.rs      ◄─── Assemble an order from stored book/person
//! ├── statement.rs  ◄─── Per-book statement
//! └── validate.rs   ◄─── Field-level violations
//! ```
//!
//! Each command takes already-loaded inputs and returns a serializable
//! response with a `render_text` method; `lib.rs` owns file loading and
//! output.

pub mod compute;
pub mod quote;
pub mod statement;
pub mod validate;

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::AppError;

/// Reads a JSON file into `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| AppError::parse(path, e))
}
