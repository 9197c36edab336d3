//! Customer tier models: discount table and spend thresholds

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Customer as the pricing engine sees it: current tier assignment plus
/// the rolling annual spend used for upgrade-on-read qualification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub id: i64,
    /// Currently assigned tier name (e.g. "SILVER")
    pub tier: String,
    pub annual_spend: f64,
}

/// Tier name -> default discount percent.
///
/// Unknown tiers resolve to zero discount (pass-through), never an
/// error: availability over strictness for configuration gaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TierDiscountTable(HashMap<String, f64>);

impl TierDiscountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_discount(mut self, tier: impl Into<String>, percent: f64) -> Self {
        self.0.insert(tier.into(), percent);
        self
    }

    /// Discount percent for a tier; None when the tier is not configured
    pub fn discount_for(&self, tier: &str) -> Option<f64> {
        self.0.get(tier).copied()
    }
}

/// Minimum annual spend required to qualify for a tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierThreshold {
    pub tier: String,
    pub min_annual_spend: f64,
}

/// Tier qualification ladder, ordered ascending by spend threshold
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TierThresholds(Vec<TierThreshold>);

impl TierThresholds {
    pub fn new(mut thresholds: Vec<TierThreshold>) -> Self {
        thresholds.sort_by(|a, b| {
            a.min_annual_spend
                .partial_cmp(&b.min_annual_spend)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self(thresholds)
    }

    /// Highest tier whose spend threshold is met, if any
    pub fn qualifying_tier(&self, annual_spend: f64) -> Option<&TierThreshold> {
        self.0
            .iter()
            .rev()
            .find(|t| annual_spend >= t.min_annual_spend)
    }

    /// Position of a tier in the ladder (0 = lowest); None if unknown
    pub fn rank_of(&self, tier: &str) -> Option<usize> {
        self.0.iter().position(|t| t.tier == tier)
    }
}
