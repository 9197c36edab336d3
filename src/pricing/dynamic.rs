//! Dynamic pricing adjusters
//!
//! Inventory-level and demand-surge adjustments that rebase the price
//! before discount stacking, plus a competitive-pricing sanity check.

use rust_decimal::prelude::*;

use crate::error::PricingError;
use crate::money::{to_decimal, to_f64, to_f64_whole};
use serde::{Deserialize, Serialize};

/// One inventory threshold with its price adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InventoryThreshold {
    pub threshold: i64,
    /// Percent applied to the base price when the threshold trips
    /// (positive = increase, negative = markdown)
    pub adjustment_percent: f64,
}

/// Inventory pricing rules: scarcity markup and overstock markdown
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InventoryPricingRules {
    /// Trips when stock is at or below the threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<InventoryThreshold>,
    /// Trips when stock is at or above the threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<InventoryThreshold>,
}

/// Adjust the base price for the current stock level.
///
/// Results round to the nearest whole currency unit, matching the
/// display granularity of inventory-driven pricing.
pub fn apply_inventory_pricing(
    base: f64,
    stock_level: i64,
    rules: &InventoryPricingRules,
) -> f64 {
    let base_d = to_decimal(base);
    let hundred = Decimal::ONE_HUNDRED;

    if let Some(low) = rules.low
        && stock_level <= low.threshold
    {
        let adjusted = base_d * (Decimal::ONE + to_decimal(low.adjustment_percent) / hundred);
        return to_f64_whole(adjusted);
    }

    if let Some(high) = rules.high
        && stock_level >= high.threshold
    {
        let adjusted = base_d * (Decimal::ONE + to_decimal(high.adjustment_percent) / hundred);
        return to_f64_whole(adjusted);
    }

    to_f64_whole(base_d)
}

/// Demand-surge rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SurgePricingRules {
    /// Demand index above which surge pricing starts (1.0 = baseline)
    pub threshold: f64,
    /// Cap on the surge increase, in percent
    pub max_increase: f64,
}

/// Increase the price proportionally to demand above the threshold,
/// capped at `max_increase` percent. Demand at or below the threshold
/// leaves the price unchanged.
pub fn apply_surge_pricing(base: f64, demand: f64, rules: &SurgePricingRules) -> f64 {
    if rules.threshold <= 0.0 || demand <= rules.threshold {
        return to_f64(to_decimal(base));
    }

    let overshoot_percent = (demand - rules.threshold) / rules.threshold * 100.0;
    let increase = overshoot_percent.min(rules.max_increase);

    let adjusted = to_decimal(base) * (Decimal::ONE + to_decimal(increase) / Decimal::ONE_HUNDRED);
    to_f64(adjusted)
}

/// Competitive pricing rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompetitivePricingRules {
    /// Maximum percent the price may sit above the competitor average
    pub max_above_average: f64,
}

/// Outcome of the competitive pricing check
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitiveCheck {
    pub is_valid: bool,
    pub average: f64,
    /// Suggested acceptable range around the competitor average
    pub suggested_min: f64,
    pub suggested_max: f64,
    pub reason: Option<String>,
}

/// Check a price against the competitor average.
///
/// Always returns a suggested `[min, max]` range so the caller can
/// re-quote. An empty competitor list is a caller error.
pub fn validate_competitive_pricing(
    price: f64,
    competitor_prices: &[f64],
    rules: &CompetitivePricingRules,
) -> Result<CompetitiveCheck, PricingError> {
    if competitor_prices.is_empty() {
        return Err(PricingError::NoCompetitorPrices);
    }

    let sum: Decimal = competitor_prices.iter().map(|p| to_decimal(*p)).sum();
    let average = sum / Decimal::from(competitor_prices.len());

    let hundred = Decimal::ONE_HUNDRED;
    let band = to_decimal(rules.max_above_average) / hundred;
    let max = average * (Decimal::ONE + band);
    let min = (average * (Decimal::ONE - band)).max(Decimal::ZERO);

    let price_d = to_decimal(price);
    let is_valid = price_d <= max;

    Ok(CompetitiveCheck {
        is_valid,
        average: to_f64(average),
        suggested_min: to_f64(min),
        suggested_max: to_f64(max),
        reason: if is_valid {
            None
        } else {
            Some(format!(
                "price {:.2} exceeds competitor average {:.2} by more than {:.0}%",
                price,
                to_f64(average),
                rules.max_above_average
            ))
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory_rules() -> InventoryPricingRules {
        InventoryPricingRules {
            low: Some(InventoryThreshold {
                threshold: 10,
                adjustment_percent: 10.0,
            }),
            high: Some(InventoryThreshold {
                threshold: 500,
                adjustment_percent: -5.0,
            }),
        }
    }

    #[test]
    fn test_low_stock_markup() {
        // stock=5 with low={threshold:10, adjustment:10} -> 100 becomes 110
        assert_eq!(apply_inventory_pricing(100.0, 5, &inventory_rules()), 110.0);
    }

    #[test]
    fn test_low_threshold_is_inclusive() {
        assert_eq!(apply_inventory_pricing(100.0, 10, &inventory_rules()), 110.0);
    }

    #[test]
    fn test_high_stock_markdown() {
        assert_eq!(apply_inventory_pricing(100.0, 600, &inventory_rules()), 95.0);
    }

    #[test]
    fn test_normal_stock_unchanged() {
        assert_eq!(apply_inventory_pricing(100.0, 50, &inventory_rules()), 100.0);
    }

    #[test]
    fn test_rounds_to_whole_currency_unit() {
        // 99.99 * 1.10 = 109.989 -> 110
        assert_eq!(apply_inventory_pricing(99.99, 5, &inventory_rules()), 110.0);
    }

    #[test]
    fn test_no_rules_configured() {
        let rules = InventoryPricingRules::default();
        assert_eq!(apply_inventory_pricing(100.0, 5, &rules), 100.0);
    }

    fn surge_rules() -> SurgePricingRules {
        SurgePricingRules {
            threshold: 1.0,
            max_increase: 25.0,
        }
    }

    #[test]
    fn test_demand_below_threshold_no_change() {
        assert_eq!(apply_surge_pricing(100.0, 0.8, &surge_rules()), 100.0);
    }

    #[test]
    fn test_demand_proportional_increase() {
        // demand 1.1 vs threshold 1.0 -> 10% overshoot -> +10%
        assert_eq!(apply_surge_pricing(100.0, 1.1, &surge_rules()), 110.0);
    }

    #[test]
    fn test_surge_capped_at_max_increase() {
        // demand 2.0 -> 100% overshoot, capped at 25%
        assert_eq!(apply_surge_pricing(100.0, 2.0, &surge_rules()), 125.0);
    }

    #[test]
    fn test_surge_zero_threshold_disables_surge() {
        let rules = SurgePricingRules {
            threshold: 0.0,
            max_increase: 25.0,
        };
        assert_eq!(apply_surge_pricing(100.0, 5.0, &rules), 100.0);
    }

    #[test]
    fn test_competitive_check_within_band() {
        let rules = CompetitivePricingRules {
            max_above_average: 10.0,
        };
        let check = validate_competitive_pricing(105.0, &[100.0, 98.0, 102.0], &rules).unwrap();
        assert!(check.is_valid);
        assert_eq!(check.average, 100.0);
        assert_eq!(check.suggested_min, 90.0);
        assert_eq!(check.suggested_max, 110.0);
        assert!(check.reason.is_none());
    }

    #[test]
    fn test_competitive_check_too_high() {
        let rules = CompetitivePricingRules {
            max_above_average: 10.0,
        };
        let check = validate_competitive_pricing(120.0, &[100.0, 98.0, 102.0], &rules).unwrap();
        assert!(!check.is_valid);
        assert!(check.reason.is_some());
        // Suggested range still returned on failure
        assert_eq!(check.suggested_max, 110.0);
    }

    #[test]
    fn test_competitive_check_empty_list_is_error() {
        let rules = CompetitivePricingRules {
            max_above_average: 10.0,
        };
        assert_eq!(
            validate_competitive_pricing(100.0, &[], &rules),
            Err(PricingError::NoCompetitorPrices)
        );
    }
}
