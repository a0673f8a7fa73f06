//! The three state-changing steps of a turn, in execution order
//!
//! 1. [`attrition`]: retire agents at tenure, age the rest, collect probes
//! 2. [`promotion`]: fill vacancies top-down from the level below
//! 3. [`replenishment`]: refill level 1, probes first
//!
//! The orchestrator runs them strictly in this order; each consumes the output
//! of the previous one.

pub mod attrition;
pub mod promotion;
pub mod replenishment;

pub use attrition::{run_attrition, AttritionOutcome};
pub use promotion::{rank_candidates, run_promotions, score, PromotionOutcome};
pub use replenishment::{run_replenishment, ReplenishmentOutcome};
