//! Price sequencer
//!
//! Composes the pricing stages in a fixed, documented order:
//!
//! 0. dynamic adjusters (inventory, surge) rebase the base price
//! 1. contract price overrides the base price -> breakdown entry
//! 2. tier discount, multiplicative, folded into the running price
//! 3. quantity discount, multiplicative, folded into the running price
//! 4. promotion discount, computed against the CONTRACT-ADJUSTED price
//!    (not the post-tier/quantity price) -> breakdown entry
//!
//! Contract and promotion discounts are tracked as named breakdown
//! lines; tier and quantity discounts are not.

use rust_decimal::prelude::*;

use crate::error::PricingError;
use crate::models::{
    Contract, DiscountBreakdownEntry, DiscountSource, DiscountValue, PriceCalculation,
    PriceContext, Promotion, QuantityBreak, TierDiscountTable,
};
use crate::money::{require_finite, to_decimal, to_f64};

use super::dynamic::{
    InventoryPricingRules, SurgePricingRules, apply_inventory_pricing, apply_surge_pricing,
};
use super::promotion::{PromotionStacking, apply_promotions};
use super::quantity::calculate_quantity_price_with_dates;
use super::tier::{apply_contract_pricing, apply_tier_discount};

/// Rule inputs for one sequenced calculation, resolved by the caller's
/// storage layer
#[derive(Debug, Clone, Default)]
pub struct SequenceInputs<'a> {
    pub contract: Option<&'a Contract>,
    pub tier_table: Option<&'a TierDiscountTable>,
    pub quantity_breaks: &'a [QuantityBreak],
    pub promotions: &'a [Promotion],
    pub inventory_rules: Option<&'a InventoryPricingRules>,
    pub surge_rules: Option<&'a SurgePricingRules>,
    pub stacking: PromotionStacking,
}

/// Run the full pricing sequence for one context.
///
/// Deterministic: same context and inputs always produce the same
/// result. The evaluation date comes from the context, never the clock.
/// Rejects non-finite money inputs up front; a NaN base price must not
/// flow through the stages and come out as a clean zero quote.
pub fn calculate_price_with_sequence(
    ctx: &PriceContext,
    inputs: &SequenceInputs<'_>,
) -> Result<PriceCalculation, PricingError> {
    require_finite(ctx.base_price, "base_price")?;
    require_finite(ctx.cost, "cost")?;

    let date = ctx.evaluation_date;
    let mut breakdown: Vec<DiscountBreakdownEntry> = Vec::new();

    // Stage 0: dynamic adjusters rebase the base price
    let mut base = ctx.base_price;
    if let (Some(rules), Some(snapshot)) = (inputs.inventory_rules, ctx.inventory) {
        base = apply_inventory_pricing(base, snapshot.available, rules);
    }
    if let (Some(rules), Some(demand)) = (inputs.surge_rules, ctx.demand) {
        base = apply_surge_pricing(base, demand.demand_index, rules);
    }

    // Stage 1: contract price overrides base
    let contract_price = match inputs.contract {
        Some(contract) => {
            let price = apply_contract_pricing(base, contract, date);
            if price != base {
                breakdown.push(DiscountBreakdownEntry {
                    source: DiscountSource::Contract,
                    description: format!("contract #{}", contract.id),
                    amount: to_f64(to_decimal(base) - to_decimal(price)),
                });
            }
            price
        }
        None => base,
    };

    let mut running = to_decimal(contract_price);

    // Stage 2: tier discount, folded in
    if let (Some(table), Some(tier)) = (inputs.tier_table, ctx.customer_tier.as_deref()) {
        running = to_decimal(apply_tier_discount(to_f64(running), tier, table));
    }

    // Stage 3: quantity discount, folded in
    let quantity_result = calculate_quantity_price_with_dates(
        to_f64(running),
        ctx.quantity,
        inputs.quantity_breaks,
        date,
    );
    running = to_decimal(quantity_result.unit_price);
    let applied_break = quantity_result.applied_break;

    // Stage 4: promotion discount, computed against the contract price
    let promo = apply_promotions(contract_price, inputs.promotions, date, inputs.stacking);
    if promo.discount_amount > 0.0 {
        for applied in &promo.applied {
            breakdown.push(DiscountBreakdownEntry {
                source: DiscountSource::Promotion,
                description: applied.name.clone(),
                amount: applied.calculated_amount,
            });
        }
        running = (running - to_decimal(promo.discount_amount)).max(Decimal::ZERO);
    }

    let unit_price = to_f64(running);
    let final_price = to_f64(running * Decimal::from(ctx.quantity));

    let margin_percent = if ctx.cost > 0.0 {
        to_f64(
            (to_decimal(unit_price) - to_decimal(ctx.cost)) / to_decimal(ctx.cost)
                * Decimal::ONE_HUNDRED,
        )
    } else {
        0.0
    };

    tracing::debug!(
        product_id = ctx.product_id,
        base_price = base,
        unit_price,
        final_price,
        "price sequence complete"
    );

    Ok(PriceCalculation {
        base_price: base,
        unit_price,
        applied_break,
        discount_breakdown: breakdown,
        margin_percent,
        final_price,
    })
}

/// Generic sequential discount application: each entry applies to the
/// remaining price in list order; the result never goes below zero.
pub fn apply_multiple_discounts(base: f64, discounts: &[DiscountValue]) -> f64 {
    let mut running = to_decimal(base);

    for discount in discounts {
        match discount {
            DiscountValue::Percentage(pct) => {
                running *= Decimal::ONE - to_decimal(*pct) / Decimal::ONE_HUNDRED;
            }
            DiscountValue::FixedAmount(amount) => {
                running -= to_decimal(*amount);
            }
        }
        running = running.max(Decimal::ZERO);
    }

    to_f64(running)
}
