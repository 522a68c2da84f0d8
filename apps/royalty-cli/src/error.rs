//! # App Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Royalty Desk                           │
//! │                                                                         │
//! │  royalty statement --book b1                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function  → Result<T, AppError>                         │  │
//! │  │                                                                  │  │
//! │  │  Args error?       ─── clap::Error ────────────┐                 │  │
//! │  │  File error?       ─── io / serde_json ────────┤                 │  │
//! │  │  Lookup error?     ─── CoreError ──────────────┼──► AppError     │  │
//! │  │  Validation error? ─── ValidationError ────────┘                 │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  stderr: "[NOT_FOUND] Book not found: b1"   exit code 67               │
//! │  --json: {"code":"NOT_FOUND","message":"Book not found: b1"}           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::path::Path;

use royalty_core::{CoreError, ValidationError};


/// Error returned from CLI commands.
///
/// ## Serialization
/// With `--json`, this is what the operator's tooling receives:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "numberOfCopies must be positive"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Every field-level problem, for `VALIDATION_ERROR`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<String>,
}

/// Error codes for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Book or person not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Records backend could not answer
    SourceError,

    /// File could not be read
    IoError,

    /// File content is not valid JSON for the expected type
    ParseError,

    /// Bad command line
    UsageError,
}

impl ErrorCode {
    /// Process exit status for this code.
    pub const fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::UsageError => 64,
            ErrorCode::ValidationError => 65,
            ErrorCode::ParseError => 66,
            ErrorCode::NotFound => 67,
            ErrorCode::SourceError => 69,
            ErrorCode::IoError => 74,
        }
    }
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
            violations: Vec::new(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a validation error carrying every violation.
    pub fn violations(errors: &[ValidationError]) -> Self {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        let summary = match messages.len() {
            0 => "Order is invalid".to_string(),
            1 => messages[0].clone(),
            n => format!("{} (and {} more)", messages[0], n - 1),
        };
        AppError {
            code: ErrorCode::ValidationError,
            message: summary,
            violations: messages,
        }
    }

    /// Creates an error for a file that could not be read.
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        AppError::new(
            ErrorCode::IoError,
            format!("Cannot read {}: {}", path.display(), err),
        )
    }

    /// Creates an error for a file that could not be parsed.
    pub fn parse(path: &Path, err: serde_json::Error) -> Self {
        AppError::new(
            ErrorCode::ParseError,
            format!("Invalid JSON in {}: {}", path.display(), err),
        )
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BookNotFound(id) => AppError::not_found("Book", &id),
            CoreError::PersonNotFound(id) => AppError::not_found("Person", &id),
            CoreError::SourceUnavailable { reason } => {
                tracing::error!(%reason, "record source unavailable");
                AppError::new(ErrorCode::SourceError, format!("Records unavailable: {}", reason))
            }
            CoreError::Validation(e) => AppError::from(e),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::violations(&[err])
    }
}

/// Converts command-line parse failures.
///
/// Keeps the first paragraph of clap's rendering on one line; the usage
/// hint that follows is only useful on a terminal.
impl From<clap::Error> for AppError {
    fn from(err: clap::Error) -> Self {
        let rendered = err.to_string();
        let message = rendered
            .trim_start()
            .lines()
            .take_while(|l| !l.trim().is_empty())
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(" ");
        let message = message.trim_start_matches("error: ");
        if message.is_empty() {
            return AppError::new(ErrorCode::UsageError, "invalid command line arguments");
        }
        AppError::new(ErrorCode::UsageError, message)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = serde_json::to_value(self.code)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{:?}", self.code));
        write!(f, "[{}] {}", code, self.message)
    }
}

impl std::error::Error for AppError {}
