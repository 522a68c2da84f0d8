//! # Validate Command

use serde::Serialize;

use royalty_core::calculator::requires_override;
use royalty_core::validation::order_violations;
use royalty_core::PublishingOrder;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub valid: bool,
    /// Whether this order type and role need `royaltyPercentOverride`.
    pub requires_override: bool,
    pub violations: Vec<Violation>,
}

impl ValidateResponse {
    pub fn render_text(&self) -> String {
        if self.valid {
            return "Order is valid.\n".to_string();
        }
        let mut out = format!("Order has {} problem(s):\n", self.violations.len());
        for v in &self.violations {
            out.push_str(&format!("  - {}: {}\n", v.field, v.message));
        }
        out
    }
}

/// Lists every field-level problem without failing.
pub fn validate(order: &PublishingOrder) -> ValidateResponse {
    let violations: Vec<Violation> = order_violations(order)
        .into_iter()
        .map(|e| Violation {
            field: e.field().to_string(),
            message: e.to_string(),
        })
        .collect();

    ValidateResponse {
        valid: violations.is_empty(),
        requires_override: requires_override(order.order_type, order.contributor_role),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use royalty_core::{ContributorRole, Discount, Money, OrderType};

    fn order() -> PublishingOrder {
        PublishingOrder {
            order_type: OrderType::Normal,
            contributor_role: ContributorRole::Proprietor,
            number_of_copies: 0,
            unit_price: Money::from_major(200),
            discount: Discount::default(),
            royalty_override: None,
            received_amount: Money::zero(),
        }
    }

    #[test]
    fn test_validate_lists_all_problems() {
        let response = validate(&order());
        assert!(!response.valid);
        assert!(response.requires_override);
        let fields: Vec<&str> = response.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["numberOfCopies", "royaltyPercentOverride"]);
        assert_eq!(
            response.render_text(),
            "Order has 2 problem(s):\n  - numberOfCopies: numberOfCopies must be positive\n  - royaltyPercentOverride: royaltyPercentOverride is required\n"
        );
    }

    #[test]
    fn test_validate_ok() {
        let mut o = order();
        o.contributor_role = ContributorRole::Author;
        o.number_of_copies = 10;
        let response = validate(&o);
        assert!(response.valid);
        assert!(!response.requires_override);
        assert_eq!(response.render_text(), "Order is valid.\n");
    }
}
