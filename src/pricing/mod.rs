//! Pricing calculation pipeline
//!
//! Stage order is fixed: validators run first, then the sequencer
//! composes contract, tier, quantity, and promotion pricing; dynamic
//! adjusters rebase the price before discount stacking; the formatter
//! and audit logger operate on the finished result.

pub mod audit;
pub mod currency;
pub mod dynamic;
pub mod promotion;
pub mod quantity;
pub mod sequencer;
pub mod tier;
pub mod validators;

pub use audit::*;
pub use currency::*;
pub use dynamic::*;
pub use promotion::*;
pub use quantity::*;
pub use sequencer::*;
pub use tier::*;
pub use validators::*;
