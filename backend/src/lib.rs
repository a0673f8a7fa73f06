//! Cohort Ladder Core - Rust Engine
//!
//! Turn-based simulation of a cohort climbing a capacity-limited career
//! ladder, with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: Turn clock
//! - **models**: Domain types (Agent, Hierarchy, probe samples, State)
//! - **phases**: Attrition, promotion, and replenishment steps of a turn
//! - **orchestrator**: Configuration, turn loop, and run reports
//! - **scenario**: Luck-factor sweeps run in parallel
//! - **export**: Flat rows for the history and outcome tables
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. No level ever holds more agents than its capacity
//! 2. All randomness is deterministic (seeded RNG)
//! 3. An agent's history holds one level per age reached
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod core;
pub mod export;
pub mod models;
pub mod orchestrator;
pub mod phases;
pub mod rng;
pub mod scenario;

// Re-exports for convenience
pub use core::turns::TurnClock;
pub use export::{GlobalOutcomeRow, HistoryRow, GLOBAL_OUTCOME_COLUMNS, HISTORY_COLUMNS};
pub use models::{
    agent::{Agent, AgentFactory, AgentId, AgentKind},
    hierarchy::{Hierarchy, HierarchyError, LevelCounts},
    probe::{default_profiles, ProbeProfile, ProbeRecord, ProfileId, SampleBook},
    state::SimulationState,
};
pub use orchestrator::{
    CohortReport, CohortSeed, Orchestrator, OrchestratorConfig, ProfileSamples, Shortfall,
    SimulationError, TurnResult,
};
pub use rng::RngManager;
pub use scenario::{default_scenarios, run_scenario, run_scenarios, Scenario, ScenarioOutcome};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn cohort_ladder_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::orchestrator::PyOrchestrator>()?;
    Ok(())
}
