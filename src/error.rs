//! Error types for the pricing engine
//!
//! Validation outcomes (below-cost price, margin floor breach, tier
//! minimum unmet) are NOT errors: they are returned as structured
//! result objects so callers can decide whether to block, warn, or
//! proceed. `PricingError` covers programming-contract violations the
//! caller must handle before a price can be produced at all.

use thiserror::Error;

/// Contract violations surfaced to the caller as hard errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// No exchange rate configured for the requested target currency
    #[error("no exchange rate configured for currency '{currency}'")]
    UnknownCurrency { currency: String },

    /// A monetary input was NaN or infinite
    #[error("{field} must be a finite number, got {value}")]
    NonFiniteAmount { field: &'static str, value: f64 },

    /// Competitive pricing check invoked with no competitor data
    #[error("competitor price list is empty")]
    NoCompetitorPrices,
}
