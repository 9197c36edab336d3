//! Price validators
//!
//! Pure checks that run before a quote is released. Failures are data,
//! not errors: each validator returns a structured result with
//! `is_valid = false` and a human-readable reason, and the caller
//! decides whether to block, warn, or proceed.

use rust_decimal::prelude::*;

use crate::models::Contract;
use crate::models::QuantityBreak;
use crate::money::{to_decimal, to_f64};
use std::collections::HashMap;

/// Outcome of the below-cost check
#[derive(Debug, Clone, PartialEq)]
pub struct PriceValidation {
    pub is_valid: bool,
    pub reason: Option<String>,
    /// The lowest acceptable price when the check fails
    pub minimum_price: Option<f64>,
}

/// Fail when `price < cost` and below-cost sales are disallowed
pub fn validate_price(price: f64, cost: f64, allow_below_cost: bool) -> PriceValidation {
    if price < cost && !allow_below_cost {
        return PriceValidation {
            is_valid: false,
            reason: Some(format!(
                "price {:.2} is below cost {:.2} and below-cost sales are not allowed",
                price, cost
            )),
            minimum_price: Some(cost),
        };
    }
    PriceValidation {
        is_valid: true,
        reason: None,
        minimum_price: None,
    }
}

/// Outcome of the margin-floor check
#[derive(Debug, Clone, PartialEq)]
pub struct MarginValidation {
    pub is_valid: bool,
    /// Current margin, cost-relative, rounded to the nearest whole percent
    pub current_margin: f64,
    /// Price that would satisfy the margin floor; callers re-quote with this
    pub required_price: f64,
    pub reason: Option<String>,
}

/// Margin floor check.
///
/// Margin is cost-relative: `(price - cost) / cost * 100`. The required
/// price is `cost / (1 - min_margin / 100)`, rounded up to the cent;
/// re-feeding it into this function with the same cost and floor always
/// validates.
pub fn validate_price_with_margin(
    price: f64,
    cost: f64,
    min_margin_percent: f64,
) -> MarginValidation {
    // Zero-cost products carry no margin floor
    if cost <= 0.0 {
        return MarginValidation {
            is_valid: true,
            current_margin: 0.0,
            required_price: 0.0,
            reason: None,
        };
    }
    if min_margin_percent >= 100.0 {
        return MarginValidation {
            is_valid: false,
            current_margin: 0.0,
            required_price: 0.0,
            reason: Some("minimum margin percent must be below 100".to_string()),
        };
    }

    let price_d = to_decimal(price);
    let cost_d = to_decimal(cost);
    let hundred = Decimal::ONE_HUNDRED;

    let margin = (price_d - cost_d) / cost_d * hundred;
    let current_margin = margin
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default();

    // Round up to the cent: rounding half-up can land below the exact
    // requirement (cost 0.01 at a 20% floor needs 0.0125), and a
    // required price under the floor would fail its own re-quote
    let required = (cost_d / (Decimal::ONE - to_decimal(min_margin_percent) / hundred))
        .round_dp_with_strategy(2, RoundingStrategy::AwayFromZero);
    let required_price = to_f64(required);

    if margin < to_decimal(min_margin_percent) {
        return MarginValidation {
            is_valid: false,
            current_margin,
            required_price,
            reason: Some(format!(
                "margin {:.0}% is below the {:.0}% floor",
                current_margin, min_margin_percent
            )),
        };
    }

    MarginValidation {
        is_valid: true,
        current_margin,
        required_price,
        reason: None,
    }
}

/// Outcome of the tier order-minimum check
#[derive(Debug, Clone, PartialEq)]
pub struct TierOrderValidation {
    pub is_valid: bool,
    /// Configured minimum for the tier, if any
    pub minimum: Option<f64>,
    /// Amount still missing to reach the minimum
    pub shortfall: f64,
    pub reason: Option<String>,
}

/// Fail when an order subtotal is below the tier's configured minimum.
/// Tiers without a configured minimum always pass.
pub fn validate_tier_order(
    subtotal: f64,
    tier: &str,
    minimums_by_tier: &HashMap<String, f64>,
) -> TierOrderValidation {
    let Some(&minimum) = minimums_by_tier.get(tier) else {
        return TierOrderValidation {
            is_valid: true,
            minimum: None,
            shortfall: 0.0,
            reason: None,
        };
    };

    if subtotal < minimum {
        let shortfall = to_f64(to_decimal(minimum) - to_decimal(subtotal));
        return TierOrderValidation {
            is_valid: false,
            minimum: Some(minimum),
            shortfall,
            reason: Some(format!(
                "order subtotal {:.2} is below the {} tier minimum of {:.2}",
                subtotal, tier, minimum
            )),
        };
    }

    TierOrderValidation {
        is_valid: true,
        minimum: Some(minimum),
        shortfall: 0.0,
        reason: None,
    }
}

/// Outcome of the contract quantity-bounds check
#[derive(Debug, Clone, PartialEq)]
pub struct ContractQuantityValidation {
    pub is_valid: bool,
    /// Nearest in-bounds quantity the caller could re-quote with
    pub suggested_quantity: u32,
    pub reason: Option<String>,
}

/// Fail when the requested quantity falls outside the contract's
/// `[min_quantity, max_quantity]` bounds
pub fn validate_contract_quantity(contract: &Contract, qty: u32) -> ContractQuantityValidation {
    if qty < contract.min_quantity {
        return ContractQuantityValidation {
            is_valid: false,
            suggested_quantity: contract.min_quantity,
            reason: Some(format!(
                "quantity {} is below the contract minimum of {}",
                qty, contract.min_quantity
            )),
        };
    }
    if let Some(max) = contract.max_quantity
        && qty > max
    {
        return ContractQuantityValidation {
            is_valid: false,
            suggested_quantity: max,
            reason: Some(format!(
                "quantity {} exceeds the contract maximum of {}",
                qty, max
            )),
        };
    }
    ContractQuantityValidation {
        is_valid: true,
        suggested_quantity: qty,
        reason: None,
    }
}

/// Outcome of the break-table overlap check
#[derive(Debug, Clone, PartialEq)]
pub struct BreakTableValidation {
    pub is_valid: bool,
    pub reason: Option<String>,
}

/// Check that breaks have non-overlapping `[min_qty, max_qty)` ranges.
/// Run at rule-definition time, not during calculation.
pub fn validate_quantity_breaks(breaks: &[QuantityBreak]) -> BreakTableValidation {
    for (i, a) in breaks.iter().enumerate() {
        for b in breaks.iter().skip(i + 1) {
            let a_end = a.max_qty.unwrap_or(u32::MAX);
            let b_end = b.max_qty.unwrap_or(u32::MAX);
            if a.min_qty < b_end && b.min_qty < a_end {
                return BreakTableValidation {
                    is_valid: false,
                    reason: Some(format!(
                        "quantity breaks at min_qty {} and {} have overlapping ranges",
                        a.min_qty, b.min_qty
                    )),
                };
            }
        }
    }
    BreakTableValidation {
        is_valid: true,
        reason: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiscountValue;

    #[test]
    fn test_below_cost_rejected() {
        let v = validate_price(50.0, 60.0, false);
        assert!(!v.is_valid);
        assert_eq!(v.minimum_price, Some(60.0));
        assert!(v.reason.is_some());
    }

    #[test]
    fn test_below_cost_allowed_when_configured() {
        let v = validate_price(50.0, 60.0, true);
        assert!(v.is_valid);
        assert_eq!(v.minimum_price, None);
    }

    #[test]
    fn test_price_at_cost_is_valid() {
        let v = validate_price(60.0, 60.0, false);
        assert!(v.is_valid);
    }

    #[test]
    fn test_margin_scenario() {
        // base=100, cost=60 -> margin 66.67% rounds to 67, floor 20% met
        let v = validate_price_with_margin(100.0, 60.0, 20.0);
        assert!(v.is_valid);
        assert_eq!(v.current_margin, 67.0);
    }

    #[test]
    fn test_margin_floor_breach_returns_required_price() {
        // price=65, cost=60 -> margin ~8%, floor 20% -> required 75.00
        let v = validate_price_with_margin(65.0, 60.0, 20.0);
        assert!(!v.is_valid);
        assert_eq!(v.required_price, 75.0);
    }

    #[test]
    fn test_margin_round_trip_property() {
        // Re-quoting at required_price always satisfies the same floor
        for (cost, floor) in [
            (60.0, 20.0),
            (10.0, 5.0),
            (99.99, 33.0),
            (1.0, 80.0),
            (0.01, 20.0),
            (0.03, 10.0),
            (0.07, 1.0),
        ] {
            let first = validate_price_with_margin(cost, cost, floor);
            let second = validate_price_with_margin(first.required_price, cost, floor);
            assert!(
                second.is_valid,
                "required_price {} did not satisfy floor {}% at cost {}",
                first.required_price, floor, cost
            );
        }
    }

    #[test]
    fn test_sub_cent_cost_required_price_rounds_up() {
        // Exact requirement 0.0125 must not round down to cost itself
        let v = validate_price_with_margin(0.01, 0.01, 20.0);
        assert!(!v.is_valid);
        assert_eq!(v.required_price, 0.02);
        let requote = validate_price_with_margin(v.required_price, 0.01, 20.0);
        assert!(requote.is_valid);
    }

    #[test]
    fn test_zero_cost_has_no_margin_floor() {
        let v = validate_price_with_margin(10.0, 0.0, 20.0);
        assert!(v.is_valid);
    }

    #[test]
    fn test_tier_order_shortfall() {
        let minimums = HashMap::from([("GOLD".to_string(), 500.0)]);
        let v = validate_tier_order(320.5, "GOLD", &minimums);
        assert!(!v.is_valid);
        assert_eq!(v.shortfall, 179.5);
    }

    #[test]
    fn test_tier_order_unknown_tier_passes() {
        let minimums = HashMap::from([("GOLD".to_string(), 500.0)]);
        let v = validate_tier_order(10.0, "SILVER", &minimums);
        assert!(v.is_valid);
        assert_eq!(v.minimum, None);
    }

    fn make_contract(min: u32, max: Option<u32>) -> Contract {
        Contract {
            id: 1,
            customer_id: 1,
            product_id: 1,
            negotiated_price: None,
            discount_percent: Some(5.0),
            min_quantity: min,
            max_quantity: max,
            valid_from: "2025-01-01T00:00:00Z".parse().unwrap(),
            valid_to: "2025-12-31T23:59:59Z".parse().unwrap(),
            active: true,
            annual_commitment: None,
        }
    }

    #[test]
    fn test_contract_quantity_below_minimum_suggests_minimum() {
        let v = validate_contract_quantity(&make_contract(10, Some(100)), 5);
        assert!(!v.is_valid);
        assert_eq!(v.suggested_quantity, 10);
    }

    #[test]
    fn test_contract_quantity_above_maximum_suggests_maximum() {
        let v = validate_contract_quantity(&make_contract(10, Some(100)), 250);
        assert!(!v.is_valid);
        assert_eq!(v.suggested_quantity, 100);
    }

    #[test]
    fn test_contract_quantity_in_bounds() {
        let v = validate_contract_quantity(&make_contract(10, Some(100)), 50);
        assert!(v.is_valid);
        assert_eq!(v.suggested_quantity, 50);
    }

    fn make_break(min: u32, max: Option<u32>) -> QuantityBreak {
        QuantityBreak {
            min_qty: min,
            max_qty: max,
            discount: DiscountValue::Percentage(5.0),
            valid_from: None,
            valid_to: None,
        }
    }

    #[test]
    fn test_break_table_overlap_detected() {
        let breaks = vec![make_break(10, Some(50)), make_break(40, Some(100))];
        let v = validate_quantity_breaks(&breaks);
        assert!(!v.is_valid);
    }

    #[test]
    fn test_break_table_adjacent_ranges_are_valid() {
        // [10, 50) and [50, 100) share a boundary but do not overlap
        let breaks = vec![make_break(10, Some(50)), make_break(50, Some(100))];
        let v = validate_quantity_breaks(&breaks);
        assert!(v.is_valid);
    }
}
