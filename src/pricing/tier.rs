//! Tier & contract resolver
//!
//! Determines a customer's effective discount tier and any active
//! negotiated-contract price, given validity windows.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;

use crate::models::{Contract, CustomerProfile, TierDiscountTable, TierThresholds};
use crate::money::{to_decimal, to_f64};

/// Resolve the customer's effective tier with upgrade-on-read
/// semantics: if the rolling annual spend qualifies for a higher tier
/// than currently assigned, the qualifying tier is returned. A customer
/// is never downgraded during a read.
pub fn determine_effective_tier(customer: &CustomerProfile, ladder: &TierThresholds) -> String {
    let Some(qualifying) = ladder.qualifying_tier(customer.annual_spend) else {
        return customer.tier.clone();
    };

    let current_rank = ladder.rank_of(&customer.tier);
    let qualifying_rank = ladder.rank_of(&qualifying.tier);

    match (current_rank, qualifying_rank) {
        (Some(current), Some(better)) if better > current => {
            tracing::debug!(
                customer_id = customer.id,
                from = %customer.tier,
                to = %qualifying.tier,
                "customer qualifies for tier upgrade"
            );
            qualifying.tier.clone()
        }
        // Current tier unknown to the ladder: trust the qualification
        (None, Some(_)) => qualifying.tier.clone(),
        _ => customer.tier.clone(),
    }
}

/// Apply the tier's default discount multiplicatively.
///
/// Unknown tiers resolve to zero discount (pass-through), never an
/// error.
pub fn apply_tier_discount(price: f64, tier: &str, table: &TierDiscountTable) -> f64 {
    let Some(percent) = table.discount_for(tier) else {
        tracing::warn!(tier, "tier has no configured discount, passing price through");
        return to_f64(to_decimal(price));
    };

    let discounted =
        to_decimal(price) * (Decimal::ONE - to_decimal(percent) / Decimal::ONE_HUNDRED);
    to_f64(discounted)
}

/// Apply contract pricing for the evaluation date.
///
/// Returns the standard price unchanged when the contract is inactive
/// or the date falls outside its window. Within the window, a
/// negotiated price wins over a discount percent.
pub fn apply_contract_pricing(
    standard_price: f64,
    contract: &Contract,
    date: DateTime<Utc>,
) -> f64 {
    if !contract.is_active_on(date) {
        return standard_price;
    }

    if let Some(negotiated) = contract.negotiated_price {
        return negotiated;
    }

    if let Some(percent) = contract.discount_percent {
        let discounted =
            to_decimal(standard_price) * (Decimal::ONE - to_decimal(percent) / Decimal::ONE_HUNDRED);
        return to_f64(discounted);
    }

    standard_price
}

/// Progress of a contract against its annual commitment
#[derive(Debug, Clone, PartialEq)]
pub struct ContractProgress {
    /// Percent of the contract period elapsed at the evaluation date
    pub elapsed_percent: f64,
    /// Linear projection of period-end spend from spend-to-date
    pub projected_annual: f64,
    /// Amount the projection falls short of the commitment (0 when on track)
    pub shortfall: f64,
    pub on_track: bool,
}

/// Project period-end spend from year-to-date spend and the elapsed
/// fraction of the contract period.
pub fn calculate_contract_progress(
    contract: &Contract,
    ytd_spend: f64,
    date: DateTime<Utc>,
) -> ContractProgress {
    let period_ms = (contract.valid_to - contract.valid_from).num_milliseconds();
    let elapsed_ms = (date - contract.valid_from).num_milliseconds();

    let elapsed_fraction = if period_ms <= 0 {
        1.0
    } else {
        (elapsed_ms as f64 / period_ms as f64).clamp(0.0, 1.0)
    };

    let projected_annual = if elapsed_fraction > 0.0 {
        to_f64(to_decimal(ytd_spend / elapsed_fraction))
    } else {
        0.0
    };

    let target = contract.annual_commitment.unwrap_or(0.0);
    let shortfall = to_f64((to_decimal(target) - to_decimal(projected_annual)).max(Decimal::ZERO));

    ContractProgress {
        elapsed_percent: to_f64(to_decimal(elapsed_fraction * 100.0)),
        projected_annual,
        shortfall,
        on_track: projected_annual >= target,
    }
}
