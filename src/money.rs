//! Money calculation utilities using rust_decimal for precision
//!
//! All pricing stages compute with `Decimal` internally and convert back
//! to `f64` at the API boundary, rounded half-up to 2 decimal places
//! (inventory pricing rounds to whole currency units, see
//! [`to_f64_whole`]).

use rust_decimal::prelude::*;

use crate::error::PricingError;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub(crate) const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Convert Decimal back to f64 rounded to the nearest whole currency unit
#[inline]
pub fn to_f64_whole(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
pub fn require_finite(value: f64, field_name: &'static str) -> Result<(), PricingError> {
    if !value.is_finite() {
        return Err(PricingError::NonFiniteAmount {
            field: field_name,
            value,
        });
    }
    Ok(())
}
