//! Luck-factor scenarios
//!
//! A scenario is one luck factor under a shared base configuration. Each
//! scenario gets its own `Orchestrator` (same seed, same constants), so the
//! runs are independent and are executed in parallel on the rayon pool.
//! Results come back in scenario order.

use crate::orchestrator::{CohortReport, Orchestrator, OrchestratorConfig, SimulationError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A named luck factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub luck_factor: f64,
}

impl Scenario {
    pub fn new(name: impl Into<String>, luck_factor: f64) -> Self {
        Self {
            name: name.into(),
            luck_factor,
        }
    }

    /// Scenario named after its luck factor, e.g. `"Luck 0.3"`
    pub fn from_luck(luck_factor: f64) -> Self {
        Self::new(format!("Luck {}", luck_factor), luck_factor)
    }
}

/// The reference sweep from pure merit to pure luck
pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("100% Meritocracy", 0.0),
        Scenario::new("25% Luck", 0.25),
        Scenario::new("50/50 Split", 0.5),
        Scenario::new("75% Luck", 0.75),
        Scenario::new("100% Luck", 1.0),
    ]
}

/// Result of running one scenario
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub result: Result<CohortReport, SimulationError>,
}

impl ScenarioOutcome {
    /// The report to export: the full report, or the partial one carried by a
    /// `NonConvergence` error. `None` only for configuration errors.
    pub fn report(&self) -> Option<&CohortReport> {
        match &self.result {
            Ok(report) => Some(report),
            Err(SimulationError::NonConvergence { report, .. }) => Some(report.as_ref()),
            Err(_) => None,
        }
    }

    pub fn converged(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run a single scenario to completion
pub fn run_scenario(
    base: &OrchestratorConfig,
    scenario: &Scenario,
) -> Result<CohortReport, SimulationError> {
    let mut orchestrator = Orchestrator::new(base.with_luck(scenario.luck_factor))?;
    let report = orchestrator.run()?;
    info!(
        scenario = %scenario.name,
        turns = report.turns,
        retirees = report.total_retirees(),
        "scenario finished"
    );
    Ok(report)
}

/// Run every scenario in parallel, returning outcomes in input order
pub fn run_scenarios(base: &OrchestratorConfig, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
    scenarios
        .par_iter()
        .map(|scenario| ScenarioOutcome {
            scenario: scenario.clone(),
            result: run_scenario(base, scenario),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn small() -> OrchestratorConfig {
        OrchestratorConfig {
            capacities: BTreeMap::from([(1, 10), (2, 4), (3, 1)]),
            target_samples: 3,
            initial_cohort: Vec::new(),
            ..OrchestratorConfig::default()
        }
    }

    #[test]
    fn test_outcomes_keep_scenario_order() {
        let outcomes = run_scenarios(&small(), &default_scenarios());
        let names: Vec<_> = outcomes.iter().map(|o| o.scenario.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["100% Meritocracy", "25% Luck", "50/50 Split", "75% Luck", "100% Luck"]
        );
        for outcome in &outcomes {
            assert!(outcome.converged());
            let report = outcome.report().unwrap();
            assert_eq!(report.luck_factor, outcome.scenario.luck_factor);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let base = small();
        let scenarios = default_scenarios();
        let parallel = run_scenarios(&base, &scenarios);
        for (outcome, scenario) in parallel.iter().zip(&scenarios) {
            let sequential = run_scenario(&base, scenario);
            assert_eq!(outcome.result, sequential);
        }
    }

    #[test]
    fn test_invalid_luck_reports_no_data() {
        let outcomes = run_scenarios(&small(), &[Scenario::from_luck(2.0)]);
        assert!(outcomes[0].report().is_none());
        assert!(matches!(
            outcomes[0].result,
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_partial_report_available_on_ceiling() {
        let base = OrchestratorConfig {
            max_tenure: 500,
            max_turns: 5,
            ..small()
        };
        let outcomes = run_scenarios(&base, &[Scenario::from_luck(0.5)]);
        assert!(!outcomes[0].converged());
        let report = outcomes[0].report().unwrap();
        assert_eq!(report.turns, 5);
        assert_eq!(report.shortfalls().len(), 5);
    }
}
