//! Orchestrator - main simulation loop
//!
//! Owns one cohort run: configuration, state, RNG, and the turn loop.
//! See `engine.rs` for the turn sequence.

pub mod config;
pub mod engine;
pub mod report;

// Re-export main types for convenience
pub use config::{
    compute_config_hash, default_initial_cohort, CohortSeed, OrchestratorConfig,
    DEFAULT_MAX_TENURE, DEFAULT_MAX_TURNS, MAX_TENURE_LIMIT, DEFAULT_SEED, DEFAULT_TARGET_SAMPLES,
};
pub use engine::{Orchestrator, SimulationError, TurnResult};
pub use report::{CohortReport, ProfileSamples, Shortfall};
