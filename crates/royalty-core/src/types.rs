//! # Domain Types
//!
//! Core domain types used throughout Royalty Desk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │     Person      │   │   OrderEntry    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  name           │   │  order_type     │       │
//! │  │  edition_year   │   │  role           │   │  copies         │       │
//! │  │  unit_price     │   │                 │   │  discount ...   │       │
//! │  └────────┬────────┘   └────────┬────────┘   └────────┬────────┘       │
//! │           └──────────────┬──────┴─────────────────────┘                │
//! │                          ▼                                              │
//! │                 ┌─────────────────┐        ┌─────────────────┐         │
//! │                 │ PublishingOrder │ ─────► │  RoyaltyResult  │         │
//! │                 └─────────────────┘compute └─────────────────┘         │
//! │                                                                         │
//! │  Percentage: basis points (u32), 750 = 7.5%                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Percentage
// =============================================================================

/// A percentage in basis points (1 bp = 0.01%).
///
/// ## Why Basis Points?
/// Statutory rates such as 7.5% must be exact. `750` is exact; `0.075` is not.
///
/// ## JSON
/// Written and read as a percent number in [0, 100] with at most two
/// decimals: `20`, `7.5`, `12.25`. Basis points never leave the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Percentage(u32);

impl Percentage {
    /// 100%.
    pub const FULL: Percentage = Percentage(10_000);

    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from a whole number of percent.
    ///
    /// ## Example
    /// ```rust
    /// use royalty_core::types::Percentage;
    ///
    /// assert_eq!(Percentage::from_whole(35).bps(), 3_500);
    /// ```
    #[inline]
    pub const fn from_whole(pct: u32) -> Self {
        Percentage(pct * 100)
    }

    /// Creates a percentage from a decimal percent value.
    ///
    /// `None` unless the value is finite, in [0, 100] and has at most two
    /// decimals.
    ///
    /// ## Example
    /// ```rust
    /// use royalty_core::types::Percentage;
    ///
    /// assert_eq!(Percentage::from_percentage(7.5), Some(Percentage::from_bps(750)));
    /// assert_eq!(Percentage::from_percentage(12.345), None);
    /// assert_eq!(Percentage::from_percentage(101.0), None);
    /// ```
    pub fn from_percentage(pct: f64) -> Option<Self> {
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return None;
        }
        let scaled = pct * 100.0;
        let bps = scaled.round();
        if (scaled - bps).abs() > 1e-6 {
            return None;
        }
        Some(Percentage(bps as u32))
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percent value (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// True when the value lies in [0%, 100%].
    #[inline]
    pub const fn is_within_whole(&self) -> bool {
        self.0 <= Self::FULL.0
    }

    /// Returns `100% - self`, or `None` above 100%.
    ///
    /// ## Example
    /// ```rust
    /// use royalty_core::types::Percentage;
    ///
    /// assert_eq!(Percentage::from_whole(35).complement(), Some(Percentage::from_whole(65)));
    /// assert_eq!(Percentage::from_whole(120).complement(), None);
    /// ```
    #[inline]
    pub const fn complement(&self) -> Option<Self> {
        if self.0 > Self::FULL.0 {
            None
        } else {
            Some(Percentage(Self::FULL.0 - self.0))
        }
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_u32(self.0 / 100)
        } else {
            serializer.serialize_f64(self.percentage())
        }
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PercentVisitor)
    }
}

struct PercentVisitor;

impl<'de> Visitor<'de> for PercentVisitor {
    type Value = Percentage;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a percent between 0 and 100 with at most two decimals")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Percentage, E> {
        if v > 100 {
            return Err(E::invalid_value(Unexpected::Unsigned(v), &self));
        }
        Ok(Percentage::from_whole(v as u32))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Percentage, E> {
        if v < 0 {
            return Err(E::invalid_value(Unexpected::Signed(v), &self));
        }
        self.visit_u64(v as u64)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Percentage, E> {
        Percentage::from_percentage(v).ok_or_else(|| E::invalid_value(Unexpected::Float(v), &self))
    }
}

/// Renders `15%`, `7.5%`, `12.25%`.
impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Order Type
// =============================================================================

/// Sales channel or format of a publishing transaction.
///
/// Closed set: every rule site matches on it exhaustively, so a new channel
/// will not compile until each site handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Regular trade sale through distributors.
    Normal,
    /// Sale to libraries, no discount, flat rate.
    Library,
    /// Promotional or government scheme, 60% base.
    SpecialScheme,
    /// Electronic edition, paid on amount received.
    Ebook,
    Audiobook,
    /// Film adaptation rights.
    Moviebook,
}

impl OrderType {
    /// Every order type, in menu order.
    pub const ALL: [OrderType; 6] = [
        OrderType::Normal,
        OrderType::Library,
        OrderType::SpecialScheme,
        OrderType::Ebook,
        OrderType::Audiobook,
        OrderType::Moviebook,
    ];

    /// Human-readable label used on statements.
    pub const fn label(&self) -> &'static str {
        match self {
            OrderType::Normal => "Normal Orders",
            OrderType::Library => "Library Orders",
            OrderType::SpecialScheme => "Special Scheme",
            OrderType::Ebook => "E-Book",
            OrderType::Audiobook => "Audio Book",
            OrderType::Moviebook => "Movie Book",
        }
    }

    /// Whether the base amount comes from `received_amount`.
    #[inline]
    pub const fn is_received_amount_based(&self) -> bool {
        matches!(self, OrderType::Ebook)
    }

    /// Whether `discount` affects the base amount.
    #[inline]
    pub const fn applies_discount(&self) -> bool {
        matches!(
            self,
            OrderType::Normal | OrderType::Audiobook | OrderType::Moviebook
        )
    }

    /// Whether a positive unit price is required.
    #[inline]
    pub const fn requires_unit_price(&self) -> bool {
        !matches!(self, OrderType::Library | OrderType::Ebook)
    }
}

impl Default for OrderType {
    fn default() -> Self {
        OrderType::Normal
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Contributor Role
// =============================================================================

/// The party receiving royalty for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributorRole {
    Author,
    Translator,
    Editor,
    /// Rights-holder of the work.
    Proprietor,
    Agency,
    /// Publisher acting as contributor.
    Publisher,
}

impl ContributorRole {
    pub const ALL: [ContributorRole; 6] = [
        ContributorRole::Author,
        ContributorRole::Translator,
        ContributorRole::Editor,
        ContributorRole::Proprietor,
        ContributorRole::Agency,
        ContributorRole::Publisher,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            ContributorRole::Author => "Author",
            ContributorRole::Translator => "Translator",
            ContributorRole::Editor => "Editor",
            ContributorRole::Proprietor => "Proprietor",
            ContributorRole::Agency => "Agency",
            ContributorRole::Publisher => "Publisher",
        }
    }
}

impl Default for ContributorRole {
    fn default() -> Self {
        ContributorRole::Author
    }
}

impl fmt::Display for ContributorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Discount
// =============================================================================

/// The fixed discount menu offered for trade orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DiscountTier {
    #[serde(rename = "35")]
    ThirtyFive,
    #[serde(rename = "40")]
    Forty,
    #[serde(rename = "45")]
    FortyFive,
}

impl DiscountTier {
    pub const fn percentage(&self) -> Percentage {
        match self {
            DiscountTier::ThirtyFive => Percentage::from_whole(35),
            DiscountTier::Forty => Percentage::from_whole(40),
            DiscountTier::FortyFive => Percentage::from_whole(45),
        }
    }
}

/// Channel discount: a menu tier or a free-form value.
///
/// ## JSON Shape
/// ```json
/// { "kind": "fixed", "tier": "35" }
/// { "kind": "custom", "rate": 30 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discount {
    Fixed { tier: DiscountTier },
    Custom { rate: Percentage },
}

impl Discount {
    /// The effective discount percentage.
    pub const fn percentage(&self) -> Percentage {
        match self {
            Discount::Fixed { tier } => tier.percentage(),
            Discount::Custom { rate } => *rate,
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::Custom {
            rate: Percentage::zero(),
        }
    }
}

// =============================================================================
// Publishing Order
// =============================================================================

/// One royalty-bearing transaction for one book edition and one contributor.
///
/// Amount fields default to zero when absent from JSON, so a half-filled
/// form still deserializes and computes to the zero result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PublishingOrder {
    pub order_type: OrderType,
    pub contributor_role: ContributorRole,
    #[serde(default)]
    pub number_of_copies: i64,
    #[serde(default)]
    pub unit_price: Money,
    #[serde(default)]
    pub discount: Discount,
    /// Royalty rate for combinations without a statutory rate.
    #[serde(default, rename = "royaltyPercentOverride")]
    pub royalty_override: Option<Percentage>,
    /// Amount received, used only for e-book orders.
    #[serde(default)]
    pub received_amount: Money,
}

impl PublishingOrder {
    /// Assembles an order from the selected book, the selected contributor
    /// and the fields the operator typed in.
    ///
    /// The unit price comes from the book and the role from the person.
    pub fn assemble(book: &Book, person: &Person, entry: &OrderEntry) -> Self {
        PublishingOrder {
            order_type: entry.order_type,
            contributor_role: person.role,
            number_of_copies: entry.number_of_copies,
            unit_price: book.unit_price,
            discount: entry.discount,
            royalty_override: entry.royalty_override,
            received_amount: entry.received_amount,
        }
    }
}

/// The operator-entered part of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderEntry {
    pub order_type: OrderType,
    #[serde(default)]
    pub number_of_copies: i64,
    #[serde(default)]
    pub discount: Discount,
    #[serde(default, rename = "royaltyPercentOverride")]
    pub royalty_override: Option<Percentage>,
    #[serde(default)]
    pub received_amount: Money,
}

// =============================================================================
// Royalty Result
// =============================================================================

/// The computed royalty split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RoyaltyResult {
    /// Gross sale basis before any split.
    pub total_amount: Money,
    /// Contributor share, in whole currency units.
    pub royalty_amount: Money,
    /// Publisher share: base after discount minus royalty.
    pub company_amount: Money,
}

impl RoyaltyResult {
    /// The "not yet computable" result.
    pub const ZERO: RoyaltyResult = RoyaltyResult {
        total_amount: Money::zero(),
        royalty_amount: Money::zero(),
        company_amount: Money::zero(),
    };

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// A royalty result with the values that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RoyaltyBreakdown {
    pub order_type: OrderType,
    pub contributor_role: ContributorRole,
    /// Amount the royalty rate applies to, rounded to a minor unit.
    pub base_amount: Money,
    /// Discount that shaped the base, `None` when the channel ignores it.
    pub discount: Option<Percentage>,
    pub royalty_rate: Percentage,
    pub result: RoyaltyResult,
}

impl RoyaltyBreakdown {
    /// One-line description for statements, e.g.
    /// `Normal Orders · discount 35% · royalty 15%`.
    pub fn describe(&self) -> String {
        let mut parts = vec![self.order_type.label().to_string()];
        match self.order_type {
            OrderType::SpecialScheme => parts.push("base 60%".to_string()),
            _ => {
                if let Some(discount) = self.discount {
                    parts.push(format!("discount {}", discount));
                }
            }
        }
        parts.push(format!("royalty {}", self.royalty_rate));
        parts.join(" · ")
    }
}

// =============================================================================
// Records
// =============================================================================

/// A book edition as served by the books collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub edition_year: i32,
    pub unit_price: Money,
}

/// A contributor as served by the persons collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub role: ContributorRole,
}

/// A stored historical order for a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PublishingRecord {
    pub id: String,
    pub book_id: String,
    pub person_id: String,
    pub order: PublishingOrder,
    #[ts(as = "String")]
    pub recorded_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
