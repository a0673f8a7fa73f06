//! Flat export rows
//!
//! Turns scenario reports into the two row sets analysts load as tables:
//!
//! - one [`HistoryRow`] per (scenario, probe agent, age step)
//! - one [`GlobalOutcomeRow`] per (scenario, level)
//!
//! Field names serialize to the column headers used in the CSV files.

use crate::orchestrator::CohortReport;
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};

/// Column headers for [`HistoryRow`]
pub const HISTORY_COLUMNS: [&str; 7] = [
    "Scenario",
    "Luck_Factor",
    "Agent_Type",
    "Base_Merit",
    "Sim_Agent_ID",
    "Age",
    "Level",
];

/// Column headers for [`GlobalOutcomeRow`]
pub const GLOBAL_OUTCOME_COLUMNS: [&str; 5] = [
    "Scenario",
    "Luck_Factor",
    "Level",
    "Retiree_Count",
    "Retiree_Percent",
];

/// Level held by one probe agent at one age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    #[serde(rename = "Scenario")]
    pub scenario: String,
    #[serde(rename = "Luck_Factor")]
    pub luck_factor: f64,
    /// Profile label, e.g. "Top 10th Percentile"
    #[serde(rename = "Agent_Type")]
    pub agent_type: String,
    #[serde(rename = "Base_Merit")]
    pub base_merit: f64,
    /// `"{luck}-{id}"`, unique across scenarios
    #[serde(rename = "Sim_Agent_ID")]
    pub sim_agent_id: String,
    #[serde(rename = "Age")]
    pub age: usize,
    #[serde(rename = "Level")]
    pub level: u8,
}

impl HistoryRow {
    /// Values in [`HISTORY_COLUMNS`] order
    pub fn csv_fields(&self) -> Vec<String> {
        vec![
            self.scenario.clone(),
            format_float(self.luck_factor),
            self.agent_type.clone(),
            format_float(self.base_merit),
            self.sim_agent_id.clone(),
            self.age.to_string(),
            self.level.to_string(),
        ]
    }
}

/// Retirements at one level in one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalOutcomeRow {
    #[serde(rename = "Scenario")]
    pub scenario: String,
    #[serde(rename = "Luck_Factor")]
    pub luck_factor: f64,
    #[serde(rename = "Level")]
    pub level: u8,
    #[serde(rename = "Retiree_Count")]
    pub retiree_count: usize,
    /// Share of the scenario's retirees, 0.0 when nobody retired
    #[serde(rename = "Retiree_Percent")]
    pub retiree_percent: f64,
}

impl GlobalOutcomeRow {
    /// Values in [`GLOBAL_OUTCOME_COLUMNS`] order
    pub fn csv_fields(&self) -> Vec<String> {
        vec![
            self.scenario.clone(),
            format_float(self.luck_factor),
            self.level.to_string(),
            self.retiree_count.to_string(),
            format_float(self.retiree_percent),
        ]
    }
}

/// Shortest round-trip form that always keeps a decimal point (`1.0`, `0.25`)
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// Scenario-qualified agent id
pub fn sim_agent_id(luck_factor: f64, id: u64) -> String {
    format!("{}-{}", format_float(luck_factor), id)
}

/// Flatten every probe record of `report` into per-age rows
///
/// Ages run from 0 up to the report's `max_tenure`; history entries past
/// that are not exported.
pub fn history_rows(scenario: &Scenario, report: &CohortReport) -> Vec<HistoryRow> {
    let max_age = report.max_tenure as usize;
    let mut rows = Vec::new();

    for samples in &report.samples {
        for record in &samples.records {
            let agent_id = sim_agent_id(scenario.luck_factor, record.id);
            for (age, &level) in record.history.iter().enumerate().take(max_age + 1) {
                rows.push(HistoryRow {
                    scenario: scenario.name.clone(),
                    luck_factor: scenario.luck_factor,
                    agent_type: samples.profile.label.clone(),
                    base_merit: record.base_merit,
                    sim_agent_id: agent_id.clone(),
                    age,
                    level,
                });
            }
        }
    }

    rows
}

/// One row per level with the retirement count and share
pub fn global_outcome_rows(scenario: &Scenario, report: &CohortReport) -> Vec<GlobalOutcomeRow> {
    report
        .global_outcomes
        .iter()
        .map(|(level, count)| GlobalOutcomeRow {
            scenario: scenario.name.clone(),
            luck_factor: scenario.luck_factor,
            level,
            retiree_count: count,
            retiree_percent: report.retirement_percent(level),
        })
        .collect()
}
