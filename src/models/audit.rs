//! Audit record and approval types
//!
//! `PriceLog` is write-once at the type level: fields are private and
//! there is no mutating API, so a record cannot change after
//! construction. The append-only store lives in `pricing::audit`.

use serde::{Deserialize, Serialize};

use super::calculation::PriceCalculation;

/// Append-only audit record: "what price was shown when".
///
/// Constructed exactly once per calculation by the audit logger; never
/// updated or deleted. This is the system of record for pricing-dispute
/// resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLog {
    id: i64,
    /// Unix millis at which the calculation was recorded
    timestamp: i64,
    calculation: PriceCalculation,
}

impl PriceLog {
    pub(crate) fn new(id: i64, timestamp: i64, calculation: PriceCalculation) -> Self {
        Self {
            id,
            timestamp,
            calculation,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn calculation(&self) -> &PriceCalculation {
        &self.calculation
    }
}

/// A proposed price change, evaluated against approval thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceChange {
    pub old_price: f64,
    pub new_price: f64,
}

impl PriceChange {
    /// Absolute percent change vs the old price; None when there is no
    /// meaningful prior price to compare against
    pub fn percent_change(&self) -> Option<f64> {
        if self.old_price <= 0.0 {
            return None;
        }
        Some((self.new_price - self.old_price).abs() / self.old_price * 100.0)
    }
}

/// Escalation level for a price change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalLevel {
    None,
    Single,
    Multiple,
}

/// Derived approval decision; not stored independently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRequirement {
    pub required: bool,
    pub level: ApprovalLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Configured approval thresholds (percent change vs previous price)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ApprovalRules {
    /// Below this percent change, no approval is needed
    pub auto_approve_threshold: f64,
    /// Above this percent change, escalation to multiple approvers
    pub requires_approval_threshold: f64,
}

impl Default for ApprovalRules {
    fn default() -> Self {
        Self {
            auto_approve_threshold: 5.0,
            requires_approval_threshold: 15.0,
        }
    }
}
