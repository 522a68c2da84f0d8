//! # Compute Command

use serde::Serialize;
use tracing::debug;

use royalty_core::validation::order_violations;
use royalty_core::{breakdown, PublishingOrder, RoyaltyBreakdown, RoyaltyResult};

use crate::error::AppError;
use crate::state::ConfigState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeResponse {
    pub description: String,
    pub result: RoyaltyResult,
    pub breakdown: RoyaltyBreakdown,
}

impl ComputeResponse {
    pub fn render_text(&self, config: &ConfigState) -> String {
        let b = &self.breakdown;
        let mut out = String::new();
        out.push_str(&format!("{}\n", self.description));
        out.push_str(&format!("Contributor role : {}\n", b.contributor_role));
        out.push_str(&format!(
            "Total amount     : {}\n",
            config.format_currency(self.result.total_amount)
        ));
        out.push_str(&format!(
            "Royalty base     : {}\n",
            config.format_currency(b.base_amount)
        ));
        out.push_str(&format!(
            "Royalty ({:>5})  : {}\n",
            b.royalty_rate.to_string(),
            config.format_currency(self.result.royalty_amount)
        ));
        out.push_str(&format!(
            "Company amount   : {}\n",
            config.format_currency(self.result.company_amount)
        ));
        out
    }
}

/// Validates an order the way the entry form does, then computes it.
///
/// Unlike [`royalty_core::compute`], this refuses incomplete orders with
/// field-level messages instead of returning the zero result.
pub fn compute_order(order: &PublishingOrder) -> Result<ComputeResponse, AppError> {
    debug!(order_type = ?order.order_type, role = ?order.contributor_role, "compute_order");

    let violations = order_violations(order);
    if !violations.is_empty() {
        return Err(AppError::violations(&violations));
    }

    let breakdown = breakdown(order)
        .ok_or_else(|| AppError::validation("Order cannot be computed"))?;

    Ok(ComputeResponse {
        description: breakdown.describe(),
        result: breakdown.result,
        breakdown,
    })
}
