//! Orchestrator Engine
//!
//! Main simulation loop driving one cohort through the ladder.
//!
//! # Architecture
//!
//! ```text
//! For each turn t:
//! 1. Attrition & collection (retire at tenure, age survivors, record probes)
//! 2. Promotion ranking (levels top..=2, merit + luck scores)
//! 3. Replenishment (refill level 1, probes first)
//! 4. Termination check (all targets met, or turn ceiling reached)
//! ```
//!
//! # Example
//!
//! ```rust
//! use cohort_ladder_core::{Orchestrator, OrchestratorConfig};
//! use std::collections::BTreeMap;
//!
//! let config = OrchestratorConfig {
//!     capacities: BTreeMap::from([(1, 10), (2, 4), (3, 1)]),
//!     target_samples: 2,
//!     initial_cohort: Vec::new(),
//!     ..OrchestratorConfig::default()
//! };
//!
//! let mut orchestrator = Orchestrator::new(config).unwrap();
//! let report = orchestrator.run().unwrap();
//! assert!(report.is_complete());
//! ```

use crate::core::turns::TurnClock;
use crate::models::agent::Agent;
use crate::models::hierarchy::{Hierarchy, HierarchyError};
use crate::models::probe::{ProbeProfile, ProfileId};
use crate::models::state::SimulationState;
use crate::orchestrator::config::OrchestratorConfig;
use crate::orchestrator::report::{CohortReport, ProfileSamples};
use crate::phases::{run_attrition, run_promotions, run_replenishment};
use crate::rng::RngManager;
use thiserror::Error;
use tracing::{debug, info, warn};

// ============================================================================
// Errors
// ============================================================================

/// Simulation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Configuration rejected before the run started
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The turn ceiling was reached before every profile met its target
    ///
    /// `report` holds everything collected up to the ceiling; its
    /// `shortfalls()` name the under-filled profiles.
    #[error("No convergence after {turns} turns: {} profile(s) below target", .report.shortfalls().len())]
    NonConvergence {
        turns: usize,
        report: Box<CohortReport>,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<HierarchyError> for SimulationError {
    fn from(err: HierarchyError) -> Self {
        SimulationError::InvalidConfiguration(err.to_string())
    }
}

// ============================================================================
// Turn Result
// ============================================================================

/// What happened during a single turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    /// Turn number (1 for the first turn)
    pub turn: usize,

    /// Agents retired at tenure
    pub num_retired: usize,

    /// Retirees added to a probe sample
    pub num_recorded: usize,

    /// Agents moved up a level
    pub num_promoted: usize,

    /// New level-1 agents
    pub num_hired: usize,

    /// New level-1 probe agents (included in `num_hired`)
    pub num_probes_hired: usize,

    /// Active agents after the turn
    pub population: usize,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Owns one cohort run and drives its turn loop
///
/// # Determinism
///
/// All randomness goes through `rng_manager` (xorshift64*). Same config,
/// including seed, gives identical reports.
pub struct Orchestrator {
    state: SimulationState,

    hierarchy: Hierarchy,

    /// Probe markers in injection priority order
    profiles: Vec<ProbeProfile>,

    rng_manager: RngManager,

    clock: TurnClock,

    luck_factor: f64,

    max_tenure: u32,

    config_hash: String,
}

impl Orchestrator {
    /// Validate `config` and place the initial cohort
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidConfiguration` if any parameter is out of range.
    pub fn new(config: OrchestratorConfig) -> Result<Self, SimulationError> {
        let hierarchy = config.validate()?;
        let config_hash = config.config_hash()?;

        let mut state = SimulationState::new(
            hierarchy.top_level(),
            config.probe_profiles.len(),
            config.target_samples,
        );
        let mut rng_manager = RngManager::new(config.rng_seed);

        for group in &config.initial_cohort {
            for _ in 0..group.count {
                let agent = state
                    .factory
                    .spawn_random(group.level, group.age, &mut rng_manager);
                state.population.push(agent);
            }
        }

        debug!(
            seeded = state.population.len(),
            levels = hierarchy.top_level(),
            luck = config.luck_factor,
            "orchestrator initialized"
        );

        Ok(Self {
            state,
            hierarchy,
            profiles: config.probe_profiles,
            rng_manager,
            clock: TurnClock::new(config.max_turns),
            luck_factor: config.luck_factor,
            max_tenure: config.max_tenure,
            config_hash,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Turns completed so far
    pub fn current_turn(&self) -> usize {
        self.clock.current_turn()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn profiles(&self) -> &[ProbeProfile] {
        &self.profiles
    }

    pub fn luck_factor(&self) -> f64 {
        self.luck_factor
    }

    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    /// Draws taken from the run's RNG so far
    pub fn rng_draws(&self) -> u64 {
        self.rng_manager.draws()
    }

    /// Records collected for the profile with the given key
    pub fn collected(&self, key: &str) -> Option<usize> {
        self.profiles
            .iter()
            .position(|p| p.key == key)
            .map(|index| self.state.samples.count(ProfileId(index)))
    }

    /// True once every profile has reached the target
    pub fn targets_met(&self) -> bool {
        self.state.samples.all_met()
    }

    // ========================================================================
    // Turn Loop
    // ========================================================================

    /// Execute one turn
    ///
    /// Does not check the termination condition; `run` does that between turns.
    pub fn step(&mut self) -> TurnResult {
        let turn = self.clock.advance();

        // STEP 1: ATTRITION & COLLECTION
        let population = std::mem::take(&mut self.state.population);
        let attrition = run_attrition(
            population,
            self.max_tenure,
            &mut self.state.samples,
            &mut self.state.global_outcomes,
        );
        let mut survivors = attrition.survivors;

        // STEP 2: PROMOTION RANKING
        let promotion = run_promotions(
            &mut survivors,
            &self.hierarchy,
            self.luck_factor,
            &mut self.rng_manager,
        );

        // STEP 3: REPLENISHMENT
        let vacancies = self
            .hierarchy
            .capacity(1)
            .saturating_sub(promotion.counts.get(1));
        let replenishment = run_replenishment(
            vacancies,
            &self.profiles,
            &self.state.samples,
            &mut self.state.factory,
            &mut self.rng_manager,
        );
        let num_hired = replenishment.hires.len();
        survivors.extend(replenishment.hires);
        self.state.population = survivors;

        let result = TurnResult {
            turn,
            num_retired: attrition.num_retired,
            num_recorded: attrition.num_recorded,
            num_promoted: promotion.num_promoted,
            num_hired,
            num_probes_hired: replenishment.num_probes,
            population: self.state.population.len(),
        };

        debug!(
            turn,
            retired = result.num_retired,
            recorded = result.num_recorded,
            promoted = result.num_promoted,
            hired = result.num_hired,
            probes = result.num_probes_hired,
            "turn complete"
        );

        result
    }

    /// Run turns until every profile meets its target
    ///
    /// # Errors
    ///
    /// `SimulationError::NonConvergence` when the turn ceiling is reached
    /// first; the error carries the partial report.
    pub fn run(&mut self) -> Result<CohortReport, SimulationError> {
        // STEP 4: TERMINATION CHECK (before each turn)
        while !self.targets_met() {
            if self.clock.at_ceiling() {
                let report = self.report();
                warn!(
                    turns = report.turns,
                    max_turns = self.clock.max_turns(),
                    luck = self.luck_factor,
                    short = report.shortfalls().len(),
                    "turn ceiling reached before sample targets were met"
                );
                return Err(SimulationError::NonConvergence {
                    turns: report.turns,
                    report: Box::new(report),
                });
            }
            self.step();
        }

        info!(
            turns = self.current_turn(),
            luck = self.luck_factor,
            retirees = self.state.global_outcomes.total(),
            "sample targets met"
        );
        Ok(self.report())
    }

    /// Snapshot of what has been collected so far
    pub fn report(&self) -> CohortReport {
        let samples = self
            .profiles
            .iter()
            .enumerate()
            .map(|(index, profile)| ProfileSamples {
                profile: profile.clone(),
                records: self.state.samples.records(ProfileId(index)).to_vec(),
            })
            .collect();

        CohortReport {
            luck_factor: self.luck_factor,
            target_samples: self.state.samples.target(),
            max_tenure: self.max_tenure,
            turns: self.current_turn(),
            config_hash: self.config_hash.clone(),
            samples,
            global_outcomes: self.state.global_outcomes.clone(),
        }
    }

    /// Active agents in population order
    pub fn agents(&self) -> &[Agent] {
        self.state.population()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::config::CohortSeed;
    use std::collections::BTreeMap;

    fn small(target: usize) -> OrchestratorConfig {
        OrchestratorConfig {
            capacities: BTreeMap::from([(1, 10), (2, 4), (3, 1)]),
            target_samples: target,
            initial_cohort: Vec::new(),
            ..OrchestratorConfig::default()
        }
    }

    #[test]
    fn test_first_turn_fills_level_one_probes_first() {
        let mut orchestrator = Orchestrator::new(small(5)).unwrap();
        let result = orchestrator.step();

        assert_eq!(result.turn, 1);
        assert_eq!(result.num_hired, 10);
        assert_eq!(result.num_probes_hired, 5);
        assert_eq!(result.num_promoted, 0);
        // Only the five ordinary hires draw
        assert_eq!(orchestrator.rng_draws(), 5);
    }

    #[test]
    fn test_seeded_cohort_consumes_one_draw_per_agent() {
        let config = OrchestratorConfig {
            initial_cohort: vec![CohortSeed::new(1, 0, 6), CohortSeed::new(2, 3, 2)],
            ..small(1)
        };
        let orchestrator = Orchestrator::new(config).unwrap();

        assert_eq!(orchestrator.agents().len(), 8);
        assert_eq!(orchestrator.rng_draws(), 8);
        assert_eq!(orchestrator.state().next_agent_id(), 8);
        assert_eq!(orchestrator.agents()[7].history(), &[2, 2, 2, 2]);
    }

    #[test]
    fn test_collected_by_key() {
        let orchestrator = Orchestrator::new(small(1)).unwrap();
        assert_eq!(orchestrator.collected("median"), Some(0));
        assert_eq!(orchestrator.collected("nope"), None);
    }

    #[test]
    fn test_non_convergence_error_message() {
        let config = OrchestratorConfig {
            max_tenure: 1_000,
            max_turns: 3,
            ..small(1)
        };
        let mut orchestrator = Orchestrator::new(config).unwrap();
        let err = orchestrator.run().unwrap_err();
        assert_eq!(
            err.to_string(),
            "No convergence after 3 turns: 5 profile(s) below target"
        );
    }
}
