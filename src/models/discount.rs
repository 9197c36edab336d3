//! Discount value type shared by quantity breaks, promotions, and the
//! generic discount applier

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::to_decimal;

/// A discount expressed either as a percentage of the basis price or a
/// fixed currency amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountValue {
    /// Percentage of the basis price (30 = 30%)
    Percentage(f64),
    /// Fixed currency amount (5.00 = €5)
    FixedAmount(f64),
}

impl DiscountValue {
    /// Discount amount this value yields against a basis price
    pub fn amount_on(&self, basis: Decimal) -> Decimal {
        match self {
            DiscountValue::Percentage(pct) => basis * to_decimal(*pct) / Decimal::ONE_HUNDRED,
            DiscountValue::FixedAmount(amount) => to_decimal(*amount),
        }
    }
}
