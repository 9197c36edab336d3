//! Engine configuration
//!
//! Organization-level pricing policy knobs. Loadable from environment
//! variables with safe defaults; callers typically deserialize one per
//! organization from storage instead.

use serde::{Deserialize, Serialize};

use crate::models::ApprovalRules;
use crate::pricing::promotion::PromotionStacking;

/// Pricing policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Permit quotes below product cost
    pub allow_below_cost: bool,
    /// Margin floor in percent, cost-relative
    pub min_margin_percent: f64,
    /// How promotions combine on a single calculation
    pub promotion_stacking: PromotionStacking,
    /// Approval thresholds for price changes
    pub approval: ApprovalRules,
    /// Markup percent applied on currency conversion
    pub currency_markup_percent: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            allow_below_cost: false,
            min_margin_percent: 0.0,
            promotion_stacking: PromotionStacking::BestSingle,
            approval: ApprovalRules::default(),
            currency_markup_percent: 0.0,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            allow_below_cost: std::env::var("PRICING_ALLOW_BELOW_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.allow_below_cost),
            min_margin_percent: std::env::var("PRICING_MIN_MARGIN_PERCENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_margin_percent),
            promotion_stacking: match std::env::var("PRICING_PROMOTION_STACKING").as_deref() {
                Ok("COMBINE_STACKABLE") => PromotionStacking::CombineStackable,
                Ok("BEST_SINGLE") => PromotionStacking::BestSingle,
                _ => defaults.promotion_stacking,
            },
            approval: ApprovalRules {
                auto_approve_threshold: std::env::var("PRICING_AUTO_APPROVE_THRESHOLD")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.approval.auto_approve_threshold),
                requires_approval_threshold: std::env::var("PRICING_REQUIRES_APPROVAL_THRESHOLD")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.approval.requires_approval_threshold),
            },
            currency_markup_percent: std::env::var("PRICING_CURRENCY_MARKUP_PERCENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.currency_markup_percent),
        }
    }
}
