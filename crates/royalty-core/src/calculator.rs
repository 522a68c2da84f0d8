//! # Royalty Calculator
//!
//! Maps a [`PublishingOrder`] to a [`RoyaltyResult`].
//!
//! ## Rule Table
//! ```text
//! ┌────────────────┬──────────────────────────┬──────────────────────────────┐
//! │ Order type     │ Base amount              │ Royalty rate                 │
//! ├────────────────┼──────────────────────────┼──────────────────────────────┤
//! │ NORMAL         │ total × (100 − discount) │ role/tier table, or override │
//! │ LIBRARY        │ total                    │ 8%                           │
//! │ SPECIAL_SCHEME │ total × 60%              │ 4%                           │
//! │ EBOOK          │ received amount          │ override                     │
//! │ AUDIOBOOK      │ total × (100 − discount) │ override                     │
//! │ MOVIEBOOK      │ total × (100 − discount) │ override                     │
//! └────────────────┴──────────────────────────┴──────────────────────────────┘
//!
//! NORMAL role/tier table:
//!   AUTHOR                        15% at 35% discount, 10% otherwise
//!   TRANSLATOR, EDITOR            7.5% at 35% discount, 5% otherwise
//!   PROPRIETOR, AGENCY, PUBLISHER override only
//! ```
//!
//! `total` is `copies × unit price`. The royalty is rounded half up to a
//! whole currency unit exactly once, from the unrounded base.
//!
//! The calculator is total: anything it cannot compute yet (missing copies,
//! missing override, a discount above 100%) yields [`RoyaltyResult::ZERO`].

use crate::money::Money;
use crate::types::{
    ContributorRole, Discount, OrderType, Percentage, PublishingOrder, RoyaltyBreakdown,
    RoyaltyResult,
};

// =============================================================================
// Statutory Rates
// =============================================================================

pub const LIBRARY_RATE: Percentage = Percentage::from_whole(8);
pub const SPECIAL_SCHEME_RATE: Percentage = Percentage::from_whole(4);
/// Share of the gross that forms the special-scheme base.
pub const SPECIAL_SCHEME_BASE_SHARE: Percentage = Percentage::from_whole(60);

/// Trade discount that unlocks the higher statutory tier.
pub const HIGH_TIER_DISCOUNT: Percentage = Percentage::from_whole(35);

pub const AUTHOR_HIGH_RATE: Percentage = Percentage::from_whole(15);
pub const AUTHOR_STANDARD_RATE: Percentage = Percentage::from_whole(10);
pub const SUPPORTING_HIGH_RATE: Percentage = Percentage::from_bps(750);
pub const SUPPORTING_STANDARD_RATE: Percentage = Percentage::from_whole(5);

// =============================================================================
// Public API
// =============================================================================

/// Computes the royalty split for an order.
///
/// Same input, same output; no I/O.
pub fn compute(order: &PublishingOrder) -> RoyaltyResult {
    breakdown(order).map(|b| b.result).unwrap_or(RoyaltyResult::ZERO)
}

/// Computes the royalty split along with the base and rate behind it.
///
/// Returns `None` wherever [`compute`] would return the zero result.
pub fn breakdown(order: &PublishingOrder) -> Option<RoyaltyBreakdown> {
    let total = gross_amount(order)?;

    let discount = if order.order_type.applies_discount() {
        let pct = order.discount.percentage();
        if !pct.is_within_whole() {
            return None;
        }
        Some(pct)
    } else {
        None
    };

    let base_share = base_share(order.order_type, order.discount)?;
    let rate = royalty_rate(
        order.order_type,
        order.contributor_role,
        order.discount,
        order.royalty_override,
    )?;
    if !rate.is_within_whole() {
        return None;
    }

    let base = total.percent_of(base_share);
    let royalty = total.scale_to_whole_units(&[base_share, rate]);
    // Whole-unit rounding can lift a tiny royalty past a fractional base.
    let royalty = royalty.min(base);

    Some(RoyaltyBreakdown {
        order_type: order.order_type,
        contributor_role: order.contributor_role,
        base_amount: base,
        discount,
        royalty_rate: rate,
        result: RoyaltyResult {
            total_amount: total,
            royalty_amount: royalty,
            company_amount: base - royalty,
        },
    })
}

/// Selects the royalty rate for an order classification.
///
/// `None` means a mandatory override is missing.
pub fn royalty_rate(
    order_type: OrderType,
    role: ContributorRole,
    discount: Discount,
    royalty_override: Option<Percentage>,
) -> Option<Percentage> {
    match order_type {
        OrderType::Library => Some(LIBRARY_RATE),
        OrderType::SpecialScheme => Some(SPECIAL_SCHEME_RATE),
        OrderType::Normal => {
            let high_tier = discount.percentage() == HIGH_TIER_DISCOUNT;
            match statutory_rates(role) {
                Some((high, _)) if high_tier => Some(high),
                Some((_, standard)) => Some(standard),
                None => royalty_override,
            }
        }
        OrderType::Ebook | OrderType::Audiobook | OrderType::Moviebook => royalty_override,
    }
}

/// Whether the order classification has no statutory rate and so needs an
/// operator-supplied override.
pub fn requires_override(order_type: OrderType, role: ContributorRole) -> bool {
    match order_type {
        OrderType::Library | OrderType::SpecialScheme => false,
        OrderType::Normal => statutory_rates(role).is_none(),
        OrderType::Ebook | OrderType::Audiobook | OrderType::Moviebook => true,
    }
}

// =============================================================================
// Internals
// =============================================================================

/// `(high tier, standard tier)` trade rates for roles that have them.
const fn statutory_rates(role: ContributorRole) -> Option<(Percentage, Percentage)> {
    match role {
        ContributorRole::Author => Some((AUTHOR_HIGH_RATE, AUTHOR_STANDARD_RATE)),
        ContributorRole::Translator | ContributorRole::Editor => {
            Some((SUPPORTING_HIGH_RATE, SUPPORTING_STANDARD_RATE))
        }
        ContributorRole::Proprietor | ContributorRole::Agency | ContributorRole::Publisher => None,
    }
}

/// Fraction of the gross that the royalty rate applies to.
fn base_share(order_type: OrderType, discount: Discount) -> Option<Percentage> {
    match order_type {
        OrderType::Library | OrderType::Ebook => Some(Percentage::FULL),
        OrderType::SpecialScheme => Some(SPECIAL_SCHEME_BASE_SHARE),
        OrderType::Normal | OrderType::Audiobook | OrderType::Moviebook => {
            discount.percentage().complement()
        }
    }
}

/// Gross sale basis, or `None` when the inputs are not ready.
fn gross_amount(order: &PublishingOrder) -> Option<Money> {
    if order.order_type.is_received_amount_based() {
        return order.received_amount.is_positive().then_some(order.received_amount);
    }

    if order.number_of_copies <= 0 {
        return None;
    }
    if order.order_type.requires_unit_price() && !order.unit_price.is_positive() {
        return None;
    }
    if order.unit_price.is_negative() {
        return None;
    }

    order.unit_price.multiply_quantity(order.number_of_copies)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountTier;

    fn trade_order(role: ContributorRole, discount: Discount) -> PublishingOrder {
        PublishingOrder {
            order_type: OrderType::Normal,
            contributor_role: role,
            number_of_copies: 100,
            unit_price: Money::from_major(200),
            discount,
            royalty_override: None,
            received_amount: Money::zero(),
        }
    }

    fn order(order_type: OrderType, copies: i64, price: i64) -> PublishingOrder {
        PublishingOrder {
            order_type,
            contributor_role: ContributorRole::Author,
            number_of_copies: copies,
            unit_price: Money::from_major(price),
            discount: Discount::default(),
            royalty_override: None,
            received_amount: Money::zero(),
        }
    }

    fn fixed(tier: DiscountTier) -> Discount {
        Discount::Fixed { tier }
    }

    fn custom(pct: u32) -> Discount {
        Discount::Custom {
            rate: Percentage::from_whole(pct),
        }
    }

    fn result(total: i64, royalty: i64, company: i64) -> RoyaltyResult {
        RoyaltyResult {
            total_amount: Money::from_major(total),
            royalty_amount: Money::from_major(royalty),
            company_amount: Money::from_major(company),
        }
    }

    // -------------------------------------------------------------------------
    // Reference scenarios
    // -------------------------------------------------------------------------

    #[test]
    fn test_library_order() {
        let r = compute(&order(OrderType::Library, 100, 200));
        assert_eq!(r, result(20_000, 1_600, 18_400));
    }

    #[test]
    fn test_special_scheme_order() {
        let b = breakdown(&order(OrderType::SpecialScheme, 100, 200)).unwrap();
        assert_eq!(b.base_amount, Money::from_major(12_000));
        assert_eq!(b.result, result(20_000, 480, 11_520));
    }

    #[test]
    fn test_normal_author_high_tier() {
        let b = breakdown(&trade_order(ContributorRole::Author, fixed(DiscountTier::ThirtyFive)))
            .unwrap();
        assert_eq!(b.base_amount, Money::from_major(13_000));
        assert_eq!(b.royalty_rate, AUTHOR_HIGH_RATE);
        assert_eq!(b.result, result(20_000, 1_950, 11_050));
    }

    #[test]
    fn test_normal_author_forty_percent_uses_standard_tier() {
        let b = breakdown(&trade_order(ContributorRole::Author, fixed(DiscountTier::Forty)))
            .unwrap();
        assert_eq!(b.base_amount, Money::from_major(12_000));
        assert_eq!(b.royalty_rate, AUTHOR_STANDARD_RATE);
        assert_eq!(b.result, result(20_000, 1_200, 10_800));
    }

    #[test]
    fn test_ebook_order() {
        let mut o = order(OrderType::Ebook, 0, 0);
        o.received_amount = Money::from_major(5_000);
        o.royalty_override = Some(Percentage::from_whole(20));
        assert_eq!(compute(&o), result(5_000, 1_000, 4_000));
    }

    #[test]
    fn test_ebook_order_from_json_percent() {
        let json = r#"{
            "orderType": "EBOOK",
            "contributorRole": "AUTHOR",
            "receivedAmount": 500000,
            "royaltyPercentOverride": 20
        }"#;
        let o: PublishingOrder = serde_json::from_str(json).unwrap();
        assert_eq!(compute(&o), result(5_000, 1_000, 4_000));
    }

    #[test]
    fn test_fractional_override_from_json() {
        // 10500 × 12.5% = 1312.5 → 1313
        let json = r#"{
            "orderType": "AUDIOBOOK",
            "contributorRole": "AUTHOR",
            "numberOfCopies": 50,
            "unitPrice": 30000,
            "discount": { "kind": "custom", "rate": 30 },
            "royaltyPercentOverride": 12.5
        }"#;
        let o: PublishingOrder = serde_json::from_str(json).unwrap();
        assert_eq!(compute(&o), result(15_000, 1_313, 9_187));
    }

    #[test]
    fn test_audiobook_order() {
        let mut o = order(OrderType::Audiobook, 50, 300);
        o.discount = custom(30);
        o.royalty_override = Some(Percentage::from_whole(12));
        let b = breakdown(&o).unwrap();
        assert_eq!(b.base_amount, Money::from_major(10_500));
        assert_eq!(b.result, result(15_000, 1_260, 9_240));
    }

    // -------------------------------------------------------------------------
    // Rate selection
    // -------------------------------------------------------------------------

    #[test]
    fn test_translator_and_editor_tiers() {
        for role in [ContributorRole::Translator, ContributorRole::Editor] {
            let high = compute(&trade_order(role, fixed(DiscountTier::ThirtyFive)));
            // 13000 × 7.5% = 975
            assert_eq!(high, result(20_000, 975, 12_025));

            let standard = compute(&trade_order(role, fixed(DiscountTier::FortyFive)));
            // 11000 × 5% = 550
            assert_eq!(standard, result(20_000, 550, 10_450));
        }
    }

    #[test]
    fn test_custom_thirty_five_counts_as_high_tier() {
        let r = compute(&trade_order(ContributorRole::Author, custom(35)));
        assert_eq!(r, result(20_000, 1_950, 11_050));
    }

    #[test]
    fn test_custom_discount_other_value_uses_standard_tier() {
        // 20000 × 70% = 14000, × 10% = 1400
        let r = compute(&trade_order(ContributorRole::Author, custom(30)));
        assert_eq!(r, result(20_000, 1_400, 12_600));
    }

    #[test]
    fn test_rights_holders_need_override_on_normal_orders() {
        for role in [
            ContributorRole::Proprietor,
            ContributorRole::Agency,
            ContributorRole::Publisher,
        ] {
            let mut o = trade_order(role, fixed(DiscountTier::ThirtyFive));
            assert!(compute(&o).is_zero());

            o.royalty_override = Some(Percentage::from_whole(20));
            // 13000 × 20% = 2600
            assert_eq!(compute(&o), result(20_000, 2_600, 10_400));
        }
    }

    #[test]
    fn test_statutory_rate_ignores_override() {
        let mut o = trade_order(ContributorRole::Author, fixed(DiscountTier::ThirtyFive));
        o.royalty_override = Some(Percentage::from_whole(50));
        assert_eq!(compute(&o).royalty_amount, Money::from_major(1_950));
    }

    #[test]
    fn test_library_and_scheme_ignore_role_and_discount() {
        for role in ContributorRole::ALL {
            let mut lib = order(OrderType::Library, 100, 200);
            lib.contributor_role = role;
            lib.discount = custom(50);
            assert_eq!(compute(&lib), result(20_000, 1_600, 18_400));

            let mut scheme = order(OrderType::SpecialScheme, 100, 200);
            scheme.contributor_role = role;
            scheme.discount = custom(50);
            assert_eq!(compute(&scheme), result(20_000, 480, 11_520));
        }
    }

    #[test]
    fn test_moviebook_uses_override_for_every_role() {
        for role in ContributorRole::ALL {
            let mut o = order(OrderType::Moviebook, 10, 1_000);
            o.contributor_role = role;
            o.discount = custom(20);
            o.royalty_override = Some(Percentage::from_whole(10));
            // 10000 × 80% = 8000, × 10% = 800
            assert_eq!(compute(&o), result(10_000, 800, 7_200));
        }
    }

    #[test]
    fn test_requires_override() {
        assert!(!requires_override(OrderType::Library, ContributorRole::Agency));
        assert!(!requires_override(OrderType::Normal, ContributorRole::Author));
        assert!(requires_override(OrderType::Normal, ContributorRole::Publisher));
        assert!(requires_override(OrderType::Ebook, ContributorRole::Author));
        assert!(requires_override(OrderType::Audiobook, ContributorRole::Editor));
    }

    // -------------------------------------------------------------------------
    // Zero result and edge cases
    // -------------------------------------------------------------------------

    #[test]
    fn test_zero_input_yields_zero_result() {
        assert!(compute(&order(OrderType::Normal, 0, 0)).is_zero());
        assert!(breakdown(&order(OrderType::Normal, 0, 0)).is_none());
    }

    #[test]
    fn test_missing_price_yields_zero_except_library() {
        assert!(compute(&order(OrderType::Normal, 10, 0)).is_zero());
        assert!(compute(&order(OrderType::SpecialScheme, 10, 0)).is_zero());
        // Library accepts a zero price; the split is simply zero.
        assert!(breakdown(&order(OrderType::Library, 10, 0)).is_some());
        assert!(compute(&order(OrderType::Library, 10, 0)).is_zero());
    }

    #[test]
    fn test_negative_inputs_yield_zero() {
        assert!(compute(&order(OrderType::Library, -5, 200)).is_zero());
        assert!(compute(&order(OrderType::Library, 5, -200)).is_zero());
    }

    #[test]
    fn test_ebook_ignores_copies_and_price() {
        let mut o = order(OrderType::Ebook, 100, 200);
        o.royalty_override = Some(Percentage::from_whole(20));
        assert!(compute(&o).is_zero());

        o.received_amount = Money::from_major(100);
        assert_eq!(compute(&o), result(100, 20, 80));
    }

    #[test]
    fn test_ebook_without_override_yields_zero() {
        let mut o = order(OrderType::Ebook, 0, 0);
        o.received_amount = Money::from_major(5_000);
        assert!(compute(&o).is_zero());
    }

    #[test]
    fn test_discount_above_hundred_yields_zero() {
        let mut o = order(OrderType::Audiobook, 10, 100);
        o.discount = custom(120);
        o.royalty_override = Some(Percentage::from_whole(10));
        assert!(compute(&o).is_zero());
    }

    #[test]
    fn test_override_above_hundred_yields_zero() {
        let mut o = order(OrderType::Ebook, 0, 0);
        o.received_amount = Money::from_major(100);
        o.royalty_override = Some(Percentage::from_whole(101));
        assert!(compute(&o).is_zero());
    }

    #[test]
    fn test_overflowing_total_yields_zero() {
        let mut o = order(OrderType::Library, i64::MAX, 0);
        o.unit_price = Money::from_minor(2);
        assert!(compute(&o).is_zero());
    }

    #[test]
    fn test_royalty_rounds_half_up_once() {
        // 3 copies × 10.50 = 31.50, 65% → 20.475, 15% → 3.07125 → 3
        let mut o = trade_order(ContributorRole::Author, fixed(DiscountTier::ThirtyFive));
        o.number_of_copies = 3;
        o.unit_price = Money::from_minor(1_050);
        let b = breakdown(&o).unwrap();
        assert_eq!(b.result.total_amount, Money::from_minor(3_150));
        assert_eq!(b.base_amount, Money::from_minor(2_048));
        assert_eq!(b.result.royalty_amount, Money::from_major(3));
        assert_eq!(b.result.company_amount, Money::from_minor(1_748));

        // Library: 1 copy × 6.25 at 8% = 0.50 → 1
        let mut lib = order(OrderType::Library, 1, 0);
        lib.unit_price = Money::from_minor(625);
        assert_eq!(compute(&lib).royalty_amount, Money::from_major(1));
    }

    #[test]
    fn test_royalty_never_exceeds_base() {
        // base 0.60, 100% rate would round to 1.00
        let mut o = order(OrderType::Ebook, 0, 0);
        o.received_amount = Money::from_minor(60);
        o.royalty_override = Some(Percentage::FULL);
        let r = compute(&o);
        assert_eq!(r.royalty_amount, Money::from_minor(60));
        assert_eq!(r.company_amount, Money::zero());
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    fn all_orders() -> Vec<PublishingOrder> {
        let discounts = [
            fixed(DiscountTier::ThirtyFive),
            fixed(DiscountTier::Forty),
            fixed(DiscountTier::FortyFive),
            custom(0),
            custom(27),
            custom(100),
        ];
        let mut orders = Vec::new();
        for order_type in OrderType::ALL {
            for role in ContributorRole::ALL {
                for discount in discounts {
                    for (copies, price) in [(1, 1), (7, 333), (100, 200), (12_345, 999)] {
                        orders.push(PublishingOrder {
                            order_type,
                            contributor_role: role,
                            number_of_copies: copies,
                            unit_price: Money::from_minor(price * 37),
                            discount,
                            royalty_override: Some(Percentage::from_bps(1_234)),
                            received_amount: Money::from_minor(price * 101),
                        });
                    }
                }
            }
        }
        orders
    }

    #[test]
    fn test_company_is_base_minus_royalty_and_non_negative() {
        for o in all_orders() {
            if let Some(b) = breakdown(&o) {
                let r = b.result;
                assert_eq!(r.company_amount, b.base_amount - r.royalty_amount, "{:?}", o);
                assert!(!r.company_amount.is_negative(), "{:?}", o);
                assert!(!r.royalty_amount.is_negative(), "{:?}", o);
                assert_eq!(r.royalty_amount.minor_part(), 0, "{:?}", o);
            }
        }
    }

    #[test]
    fn test_compute_is_idempotent() {
        for o in all_orders() {
            assert_eq!(compute(&o), compute(&o));
            assert_eq!(breakdown(&o), breakdown(&o));
        }
    }

    #[test]
    fn test_describe() {
        let b = breakdown(&trade_order(ContributorRole::Translator, fixed(DiscountTier::ThirtyFive)))
            .unwrap();
        assert_eq!(b.describe(), "Normal Orders · discount 35% · royalty 7.5%");

        let b = breakdown(&order(OrderType::SpecialScheme, 1, 100)).unwrap();
        assert_eq!(b.describe(), "Special Scheme · base 60% · royalty 4%");

        let b = breakdown(&order(OrderType::Library, 1, 100)).unwrap();
        assert_eq!(b.describe(), "Library Orders · royalty 8%");
    }
}
