//! # Error Types
//!
//! Domain-specific error types for royalty-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  royalty-core errors (this file)                                       │
//! │  ├── CoreError        - Lookup and record-source failures              │
//! │  └── ValidationError  - Field-level input problems                     │
//! │                                                                         │
//! │  royalty-cli errors (app)                                              │
//! │  └── AppError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → stderr / JSON          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator itself never returns an error: incomplete input maps to
//! the zero result. These types cover the work around it.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while fetching or assembling royalty inputs.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No book with this id in the record source.
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// No person with this id in the record source.
    #[error("Person not found: {0}")]
    PersonNotFound(String),

    /// The record source could not answer.
    ///
    /// ## When This Occurs
    /// - The records backend is unreachable
    /// - A stored record references a person that no longer exists
    #[error("Record source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
///
/// Field names use the camelCase spelling of the serialized order so the
/// front-end can attach the message to the right input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., a record id inserted twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Duplicate { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
