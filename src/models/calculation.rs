//! Price calculation result types

use serde::{Deserialize, Serialize};

use super::quantity_break::QuantityBreak;

/// Which stage produced a breakdown entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountSource {
    Contract,
    Promotion,
    Tier,
    Quantity,
    Manual,
}

/// A named discount line in the calculation result.
///
/// Only contract and promotion discounts are tracked as discrete
/// entries; tier and quantity discounts are folded into the running
/// price by the sequencer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountBreakdownEntry {
    pub source: DiscountSource,
    pub description: String,
    /// Discount amount in currency units (positive = price reduction)
    pub amount: f64,
}

/// Immutable result of one price calculation, returned to the caller
/// and embedded verbatim in the audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCalculation {
    /// Base price after dynamic (inventory/surge) adjustments
    pub base_price: f64,
    /// Per-unit price after all discounts
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_break: Option<QuantityBreak>,
    pub discount_breakdown: Vec<DiscountBreakdownEntry>,
    /// Margin vs cost, `(unit_price - cost) / cost * 100`
    pub margin_percent: f64,
    /// `unit_price * quantity`
    pub final_price: f64,
}
