//! Attrition & collection
//!
//! First step of every turn. Agents at the maximum tenure retire, every other
//! agent ages by one. Retiring probes are recorded into their profile's sample
//! set while that profile is still below target.
//!
//! The pass consumes the previous population and yields a fresh survivors
//! sequence, so promotion can only ever see agents that survived this turn.

use crate::models::agent::Agent;
use crate::models::hierarchy::LevelCounts;
use crate::models::probe::SampleBook;

/// Result of one attrition pass
#[derive(Debug)]
pub struct AttritionOutcome {
    /// Agents still active, aged by one, in their previous order
    pub survivors: Vec<Agent>,

    /// Agents that retired this turn
    pub num_retired: usize,

    /// Retirees that were added to a probe sample
    pub num_recorded: usize,
}

/// Retire agents at `max_tenure` and age the rest
///
/// Each retirement increments `global_outcomes` at the retiree's level.
pub fn run_attrition(
    population: Vec<Agent>,
    max_tenure: u32,
    samples: &mut SampleBook,
    global_outcomes: &mut LevelCounts,
) -> AttritionOutcome {
    let mut survivors = Vec::with_capacity(population.len());
    let mut num_retired = 0;
    let mut num_recorded = 0;

    for mut agent in population.into_iter().filter(Agent::is_active) {
        if agent.is_due_for_retirement(max_tenure) {
            agent.retire();
            global_outcomes.add(agent.level());
            num_retired += 1;

            if let Some(profile) = agent.kind().profile() {
                if samples.record(profile, &agent) {
                    num_recorded += 1;
                }
            }
        } else {
            agent.age_one_turn();
            survivors.push(agent);
        }
    }

    AttritionOutcome {
        survivors,
        num_retired,
        num_recorded,
    }
}
