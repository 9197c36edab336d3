//! Price context: the read-only input to one calculation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inventory levels at calculation time, supplied by the caller's
/// storage layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub on_hand: i64,
    pub reserved: i64,
    pub available: i64,
}

impl InventorySnapshot {
    pub fn new(on_hand: i64, reserved: i64) -> Self {
        Self {
            on_hand,
            reserved,
            available: on_hand - reserved,
        }
    }
}

/// Demand signal for surge pricing (1.0 = baseline demand)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DemandSignal {
    pub demand_index: f64,
}

/// The read-only input to a single price calculation.
///
/// Created fresh per request and owned exclusively by the calculation
/// call; the engine never mutates it. The evaluation date is injected
/// explicitly so date-bounded checks stay deterministic under test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceContext {
    pub organization_id: i64,
    pub product_id: i64,
    pub category_id: Option<i64>,
    pub customer_id: Option<i64>,
    /// Customer tier name (e.g. "GOLD"); None for anonymous pricing
    pub customer_tier: Option<String>,
    pub base_price: f64,
    pub cost: f64,
    pub quantity: u32,
    pub evaluation_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<InventorySnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demand: Option<DemandSignal>,
}
