//! # royalty-core: Pure Royalty Rules for Royalty Desk
//!
//! This crate turns a publishing order into a royalty split. Everything here
//! is a pure function over plain values; records arrive through the
//! [`source::RecordSource`] trait and whoever implements it owns the I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Royalty Desk Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 royalty-cli (apps/royalty-cli)                   │   │
//! │  │   compute ──► quote ──► statement ──► validate                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ royalty-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ calculator │  │ statement │  │ validation│  │   │
//! │  │   │  Order    │  │  compute   │  │ per-book  │  │   form    │  │   │
//! │  │   │  Result   │  │  breakdown │  │  lines    │  │   rules   │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PublishingOrder, RoyaltyResult, Book, Person, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`calculator`] - The royalty rule engine
//! - [`statement`] - Per-book statement aggregation
//! - [`source`] - Data-fetch boundary
//! - [`validation`] - Caller-side order validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use royalty_core::calculator::compute;
//! use royalty_core::money::Money;
//! use royalty_core::types::{ContributorRole, Discount, DiscountTier, OrderType, PublishingOrder};
//!
//! let order = PublishingOrder {
//!     order_type: OrderType::Normal,
//!     contributor_role: ContributorRole::Author,
//!     number_of_copies: 100,
//!     unit_price: Money::from_major(200),
//!     discount: Discount::Fixed { tier: DiscountTier::ThirtyFive },
//!     royalty_override: None,
//!     received_amount: Money::zero(),
//! };
//!
//! let result = compute(&order);
//! assert_eq!(result.total_amount, Money::from_major(20_000));
//! assert_eq!(result.royalty_amount, Money::from_major(1_950));
//! assert_eq!(result.company_amount, Money::from_major(11_050));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod money;
pub mod source;
pub mod statement;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{breakdown, compute};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use source::{MemorySource, RecordSource};
pub use statement::{Statement, StatementLine};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minor currency units per whole unit (paise per rupee, cents per dollar).
///
/// Royalty amounts are rounded to multiples of this.
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Earliest edition year accepted for a book.
pub const MIN_EDITION_YEAR: i32 = 1800;

/// Latest edition year accepted for a book.
pub const MAX_EDITION_YEAR: i32 = 2200;
