//! Simulation State
//!
//! Everything one cohort run owns: the live population, the id factory, the
//! probe samples and the cumulative retirement counts. One instance per run;
//! nothing here is shared across runs.
//!
//! # Critical Invariants
//!
//! 1. **Capacity**: active agents per level never exceed that level's capacity
//!    at a turn boundary
//! 2. **Id uniqueness**: every agent id comes from the single `AgentFactory`
//! 3. **Sample cap**: no profile holds more than `target` records

use crate::models::agent::{Agent, AgentFactory};
use crate::models::hierarchy::LevelCounts;
use crate::models::probe::SampleBook;

/// Complete state of one cohort run
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Active agents, in population order (survivors first, then new hires)
    pub(crate) population: Vec<Agent>,

    pub(crate) factory: AgentFactory,

    pub(crate) samples: SampleBook,

    /// Retirements per level, cumulative over the run
    pub(crate) global_outcomes: LevelCounts,
}

impl SimulationState {
    pub fn new(top_level: u8, num_profiles: usize, target_samples: usize) -> Self {
        Self {
            population: Vec::new(),
            factory: AgentFactory::new(),
            samples: SampleBook::new(num_profiles, target_samples),
            global_outcomes: LevelCounts::new(top_level),
        }
    }

    pub fn population(&self) -> &[Agent] {
        &self.population
    }

    pub fn num_agents(&self) -> usize {
        self.population.len()
    }

    pub fn samples(&self) -> &SampleBook {
        &self.samples
    }

    pub fn global_outcomes(&self) -> &LevelCounts {
        &self.global_outcomes
    }

    /// Id the next created agent will receive
    pub fn next_agent_id(&self) -> u64 {
        self.factory.next_id()
    }
}
