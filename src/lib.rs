//! Pricing engine for multi-tenant B2B commerce
//!
//! A library of pure, synchronous pricing calculations: contract pricing,
//! tier discounts, quantity breaks, promotions, dynamic adjustments,
//! currency conversion, and approval gating. The engine holds no state
//! between calls and performs no I/O; callers fetch the inputs, build a
//! [`PriceContext`], and persist the returned audit records.

pub mod config;
pub mod error;
pub mod models;
pub mod money;
pub mod pricing;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use config::EngineConfig;
pub use error::PricingError;
pub use models::{
    ApprovalLevel, ApprovalRequirement, Contract, CustomerProfile, DiscountBreakdownEntry,
    DiscountSource, DiscountValue, InventorySnapshot, PriceCalculation, PriceContext, PriceLog,
    Promotion, QuantityBreak, TierDiscountTable,
};
pub use pricing::audit::AuditLog;
pub use pricing::promotion::PromotionStacking;
pub use pricing::sequencer::{SequenceInputs, calculate_price_with_sequence};
