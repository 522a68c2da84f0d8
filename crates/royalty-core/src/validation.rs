//! # Validation Module
//!
//! Caller-side checks run before an order is submitted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Unknown order type / role rejected                                │
//! │  └── Non-numeric amounts rejected                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Field-level business rules (copies, price, override ...)          │
//! │  └── One message per field, for the form                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: calculator::compute                                          │
//! │  └── Total; anything still incomplete becomes the zero result          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use royalty_core::money::Money;
//! use royalty_core::types::{ContributorRole, Discount, OrderType, PublishingOrder};
//! use royalty_core::validation::{order_violations, validate_order};
//!
//! let order = PublishingOrder {
//!     order_type: OrderType::Ebook,
//!     contributor_role: ContributorRole::Author,
//!     number_of_copies: 0,
//!     unit_price: Money::zero(),
//!     discount: Discount::default(),
//!     royalty_override: None,
//!     received_amount: Money::zero(),
//! };
//!
//! assert!(validate_order(&order).is_err());
//! assert_eq!(order_violations(&order).len(), 2);
//! ```

use crate::calculator::requires_override;
use crate::error::ValidationError;
use crate::types::{Book, Percentage, Person, PublishingOrder, PublishingRecord};
use crate::{MAX_EDITION_YEAR, MIN_EDITION_YEAR};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length for book and person names.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// Order Validation
// =============================================================================

/// Lists every field-level problem with an order, in form order.
///
/// ## Rules
/// ```text
/// numberOfCopies          > 0            all types except EBOOK
/// unitPrice               > 0            all types except EBOOK, LIBRARY
///                         >= 0           LIBRARY
/// receivedAmount          > 0            EBOOK only
/// discountPercent         0..=100        NORMAL, AUDIOBOOK, MOVIEBOOK
/// royaltyPercentOverride  present, > 0   when no statutory rate exists
///                         <= 100         whenever present
/// ```
pub fn order_violations(order: &PublishingOrder) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let order_type = order.order_type;

    if order_type.is_received_amount_based() {
        if !order.received_amount.is_positive() {
            errors.push(must_be_positive("receivedAmount"));
        }
    } else {
        if order.number_of_copies <= 0 {
            errors.push(must_be_positive("numberOfCopies"));
        }
        if order_type.requires_unit_price() {
            if !order.unit_price.is_positive() {
                errors.push(must_be_positive("unitPrice"));
            }
        } else if let Err(e) = validate_price(order.unit_price.minor()) {
            errors.push(e);
        }
    }

    if order_type.applies_discount() {
        if let Err(e) = validate_percentage("discountPercent", order.discount.percentage()) {
            errors.push(e);
        }
    }

    match order.royalty_override {
        None if requires_override(order_type, order.contributor_role) => {
            errors.push(ValidationError::Required {
                field: "royaltyPercentOverride".to_string(),
            });
        }
        Some(rate) if rate.is_zero() && requires_override(order_type, order.contributor_role) => {
            errors.push(must_be_positive("royaltyPercentOverride"));
        }
        Some(rate) => {
            if let Err(e) = validate_percentage("royaltyPercentOverride", rate) {
                errors.push(e);
            }
        }
        None => {}
    }

    errors
}

/// Validates an order, returning the first problem found.
pub fn validate_order(order: &PublishingOrder) -> ValidationResult<()> {
    match order_violations(order).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// =============================================================================
// Record Validation
// =============================================================================

/// Validates a book as received from the books collaborator.
pub fn validate_book(book: &Book) -> ValidationResult<()> {
    validate_uuid(&book.id)?;
    validate_name("name", &book.name)?;
    validate_edition_year(book.edition_year)?;
    validate_price(book.unit_price.minor())?;
    Ok(())
}

/// Validates a person as received from the persons collaborator.
pub fn validate_person(person: &Person) -> ValidationResult<()> {
    validate_uuid(&person.id)?;
    validate_name("name", &person.name)?;
    Ok(())
}

/// Validates the identifiers of a stored publishing record.
///
/// The embedded order is not checked: historical records compute leniently.
pub fn validate_record(record: &PublishingRecord) -> ValidationResult<()> {
    validate_uuid(&record.id)?;
    validate_uuid(&record.book_id)?;
    validate_uuid(&record.person_id)?;
    Ok(())
}

/// Checks that a stored order carries the role of the person it belongs to.
///
/// Statements label each line with the person's name and the order's role,
/// so the two must agree.
pub fn validate_record_role(record: &PublishingRecord, person: &Person) -> ValidationResult<()> {
    if record.order.contributor_role != person.role {
        return Err(ValidationError::InvalidFormat {
            field: "order.contributorRole".to_string(),
            reason: format!(
                "{} does not match the role of person '{}' ({})",
                record.order.contributor_role, person.id, person.role
            ),
        });
    }
    Ok(())
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a display name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use royalty_core::validation::validate_name;
///
/// assert!(validate_name("name", "The Weaver's Handbook").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an edition year against [`MIN_EDITION_YEAR`]..=[`MAX_EDITION_YEAR`].
pub fn validate_edition_year(year: i32) -> ValidationResult<()> {
    if !(MIN_EDITION_YEAR..=MAX_EDITION_YEAR).contains(&year) {
        return Err(ValidationError::OutOfRange {
            field: "editionYear".to_string(),
            min: MIN_EDITION_YEAR as i64,
            max: MAX_EDITION_YEAR as i64,
        });
    }

    Ok(())
}

/// Validates a price in minor units. Zero is allowed.
///
/// ## Example
/// ```rust
/// use royalty_core::validation::validate_price;
///
/// assert!(validate_price(20_000).is_ok());
/// assert!(validate_price(0).is_ok());
/// assert!(validate_price(-100).is_err());
/// ```
pub fn validate_price(minor: i64) -> ValidationResult<()> {
    if minor < 0 {
        return Err(ValidationError::OutOfRange {
            field: "unitPrice".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates that a percentage lies in [0, 100].
pub fn validate_percentage(field: &str, rate: Percentage) -> ValidationResult<()> {
    if !rate.is_within_whole() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a UUID string.
///
/// ## Example
/// ```rust
/// use royalty_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

fn must_be_positive(field: &str) -> ValidationError {
    ValidationError::MustBePositive {
        field: field.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
