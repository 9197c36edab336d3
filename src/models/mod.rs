//! Value types consumed and produced by the pricing pipeline
//!
//! All entities here are constructed per-request from data the caller
//! already owns; the engine never mutates them and holds no state
//! between calculations.

pub mod audit;
pub mod calculation;
pub mod context;
pub mod contract;
pub mod discount;
pub mod promotion;
pub mod quantity_break;
pub mod tier;

pub use audit::{ApprovalLevel, ApprovalRequirement, ApprovalRules, PriceChange, PriceLog};
pub use calculation::{DiscountBreakdownEntry, DiscountSource, PriceCalculation};
pub use context::{DemandSignal, InventorySnapshot, PriceContext};
pub use contract::Contract;
pub use discount::DiscountValue;
pub use promotion::{Promotion, PromotionUsage};
pub use quantity_break::QuantityBreak;
pub use tier::{CustomerProfile, TierDiscountTable, TierThreshold, TierThresholds};
