//! Negotiated contract model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A negotiated, time-bounded price agreement for a customer-product
/// pair.
///
/// When both `negotiated_price` and `discount_percent` are set, the
/// negotiated price is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negotiated_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,
    pub min_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<u32>,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub active: bool,
    /// Committed annual spend, used for progress tracking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_commitment: Option<f64>,
}

impl Contract {
    /// Whether the contract is active and `date` falls inside its
    /// validity window
    pub fn is_active_on(&self, date: DateTime<Utc>) -> bool {
        self.active && date >= self.valid_from && date <= self.valid_to
    }

    /// Whether `qty` falls inside the contract's quantity bounds
    pub fn covers_quantity(&self, qty: u32) -> bool {
        if qty < self.min_quantity {
            return false;
        }
        match self.max_quantity {
            Some(max) => qty <= max,
            None => true,
        }
    }
}
