//! Quantity break model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::discount::DiscountValue;

/// A volume discount that activates once the requested quantity crosses
/// `min_qty`.
///
/// Breaks within a rule set must have non-overlapping `[min_qty, max_qty)`
/// ranges; see `validators::validate_quantity_breaks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityBreak {
    pub min_qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_qty: Option<u32>,
    pub discount: DiscountValue,
    /// Valid from datetime; None = no lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    /// Valid until datetime; None = no upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,
}

impl QuantityBreak {
    /// Whether this break's validity window contains `date`
    pub fn is_valid_on(&self, date: DateTime<Utc>) -> bool {
        if let Some(from) = self.valid_from
            && date < from
        {
            return false;
        }
        if let Some(to) = self.valid_to
            && date > to
        {
            return false;
        }
        true
    }
}
