//! Promotion evaluator
//!
//! Filters promotions by activity window and customer eligibility, then
//! applies them under one of two stacking policies. Which policy an
//! organization uses is configuration (`EngineConfig.promotion_stacking`),
//! not a property of the data.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{CustomerProfile, DiscountValue, Promotion, PromotionUsage};
use crate::money::{to_decimal, to_f64};

/// Stacking policy for a calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionStacking {
    /// Apply only the single best non-stackable promotion
    #[default]
    BestSingle,
    /// Compound all active stackable promotions; fall back to the best
    /// single non-stackable one when none are stackable
    CombineStackable,
}

/// Whether `date` falls inside the promotion's activity window AND the
/// explicit `active` flag is set. The flag is independent of the dates.
pub fn is_promotion_active(promo: &Promotion, date: DateTime<Utc>) -> bool {
    if !promo.active {
        return false;
    }
    if let Some(start) = promo.start_date
        && date < start
    {
        return false;
    }
    if let Some(end) = promo.end_date
        && date > end
    {
        return false;
    }
    true
}

/// A promotion that contributed to the final price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedPromotion {
    pub promotion_id: i64,
    pub name: String,
    pub discount: DiscountValue,
    /// Calculated amount after applying this promotion
    pub calculated_amount: f64,
}

/// Result of promotion application
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PromotionApplication {
    /// Price after promotions, floored at zero
    pub final_price: f64,
    /// Total discount amount
    pub discount_amount: f64,
    pub applied: Vec<AppliedPromotion>,
}

/// Apply promotions to a price under the given stacking policy.
///
/// `BestSingle` picks the non-stackable promotion with the largest
/// computed discount amount against `price`. `CombineStackable`
/// compounds every active stackable promotion multiplicatively
/// (fixed amounts subtract in sequence) and only falls back to the best
/// single non-stackable promotion when no stackable one is active.
pub fn apply_promotions(
    price: f64,
    promos: &[Promotion],
    date: DateTime<Utc>,
    stacking: PromotionStacking,
) -> PromotionApplication {
    let active: Vec<&Promotion> = promos
        .iter()
        .filter(|p| is_promotion_active(p, date))
        .collect();

    if active.is_empty() {
        return PromotionApplication {
            final_price: to_f64(to_decimal(price)),
            discount_amount: 0.0,
            applied: vec![],
        };
    }

    match stacking {
        PromotionStacking::BestSingle => apply_best_single(price, &active),
        PromotionStacking::CombineStackable => {
            let stackable: Vec<&Promotion> =
                active.iter().filter(|p| p.stackable).copied().collect();
            if stackable.is_empty() {
                apply_best_single(price, &active)
            } else {
                apply_stacked(price, &stackable)
            }
        }
    }
}

/// Best single non-stackable promotion by computed discount amount
fn apply_best_single(price: f64, active: &[&Promotion]) -> PromotionApplication {
    let basis = to_decimal(price);

    let best = active
        .iter()
        .filter(|p| !p.stackable)
        .max_by(|a, b| {
            a.discount
                .amount_on(basis)
                .cmp(&b.discount.amount_on(basis))
        });

    let Some(promo) = best else {
        return PromotionApplication {
            final_price: to_f64(basis),
            discount_amount: 0.0,
            applied: vec![],
        };
    };

    let amount = promo.discount.amount_on(basis).min(basis);
    let final_price = (basis - amount).max(Decimal::ZERO);

    PromotionApplication {
        final_price: to_f64(final_price),
        discount_amount: to_f64(amount),
        applied: vec![AppliedPromotion {
            promotion_id: promo.id,
            name: promo.name.clone(),
            discount: promo.discount,
            calculated_amount: to_f64(amount),
        }],
    }
}

/// Compound stackable promotions against a running price, floored at
/// zero
fn apply_stacked(price: f64, stackable: &[&Promotion]) -> PromotionApplication {
    let original = to_decimal(price);
    let mut running = original;
    let mut applied = Vec::with_capacity(stackable.len());

    for promo in stackable {
        let before = running;
        match promo.discount {
            DiscountValue::Percentage(pct) => {
                running *= Decimal::ONE - to_decimal(pct) / Decimal::ONE_HUNDRED;
            }
            DiscountValue::FixedAmount(amount) => {
                running = (running - to_decimal(amount)).max(Decimal::ZERO);
            }
        }
        applied.push(AppliedPromotion {
            promotion_id: promo.id,
            name: promo.name.clone(),
            discount: promo.discount,
            calculated_amount: to_f64(before - running),
        });
    }

    PromotionApplication {
        final_price: to_f64(running),
        discount_amount: to_f64(original - running),
        applied,
    }
}

/// Eligibility decision for one customer/promotion pair
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionEligibility {
    pub allowed: bool,
    pub reason: Option<String>,
}

/// Check whether a customer may use a promotion.
///
/// The first failing check wins, in this order: activity, usage cap,
/// tier eligibility.
pub fn can_use_promotion(
    promo: &Promotion,
    customer: &CustomerProfile,
    usage: Option<&PromotionUsage>,
    date: DateTime<Utc>,
) -> PromotionEligibility {
    if !is_promotion_active(promo, date) {
        return PromotionEligibility {
            allowed: false,
            reason: Some("Promotion not active".to_string()),
        };
    }

    if let Some(max_uses) = promo.max_uses_per_customer
        && let Some(record) = usage
        && record.use_count >= max_uses
    {
        return PromotionEligibility {
            allowed: false,
            reason: Some(format!(
                "Customer has reached maximum uses ({}) for this promotion",
                max_uses
            )),
        };
    }

    if let Some(tiers) = &promo.customer_tiers
        && !tiers.iter().any(|t| t == &customer.tier)
    {
        return PromotionEligibility {
            allowed: false,
            reason: Some("Customer tier not eligible".to_string()),
        };
    }

    PromotionEligibility {
        allowed: true,
        reason: None,
    }
}
