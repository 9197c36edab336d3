//! Promotion model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::discount::DiscountValue;

/// A marketing promotion.
///
/// Activity depends on BOTH the `active` flag and the optional
/// `start_date`/`end_date` window; the flag is an explicit kill switch
/// independent of the dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: i64,
    pub name: String,
    pub discount: DiscountValue,
    /// Whether this promotion may combine with other stackable ones
    pub stackable: bool,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_uses_per_customer: Option<u32>,
    /// Eligible tier names; None = all tiers eligible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_tiers: Option<Vec<String>>,
}

/// How many times a customer has already redeemed a promotion
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PromotionUsage {
    pub promotion_id: i64,
    pub customer_id: i64,
    pub use_count: u32,
}
