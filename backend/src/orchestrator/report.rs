//! Run report
//!
//! The two data products of a cohort run: the per-profile probe records and
//! the per-level retirement counts. Reports are plain serde data so callers
//! can write them out or compare two runs byte for byte.

use crate::models::hierarchy::LevelCounts;
use crate::models::probe::{ProbeProfile, ProbeRecord};
use serde::{Deserialize, Serialize};

/// Records collected for one probe profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSamples {
    pub profile: ProbeProfile,
    pub records: Vec<ProbeRecord>,
}

/// A profile that ended the run below its target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub profile: String,
    pub collected: usize,
    pub target: usize,
}

impl Shortfall {
    /// Records still missing
    pub fn missing(&self) -> usize {
        self.target.saturating_sub(self.collected)
    }
}

/// Outcome of a cohort run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortReport {
    pub luck_factor: f64,
    pub target_samples: usize,

    /// Retirement age of the run; histories hold `max_tenure + 1` entries
    pub max_tenure: u32,

    /// Turns executed
    pub turns: usize,

    /// Hash of the config that produced this report
    pub config_hash: String,

    /// One entry per profile, in configured order
    pub samples: Vec<ProfileSamples>,

    /// Cumulative retirements per level
    pub global_outcomes: LevelCounts,
}

impl CohortReport {
    /// Profiles that did not reach the target (empty for a converged run)
    pub fn shortfalls(&self) -> Vec<Shortfall> {
        self.samples
            .iter()
            .filter(|s| s.records.len() < self.target_samples)
            .map(|s| Shortfall {
                profile: s.profile.key.clone(),
                collected: s.records.len(),
                target: self.target_samples,
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.samples
            .iter()
            .all(|s| s.records.len() >= self.target_samples)
    }

    /// Samples for the profile with the given key
    pub fn samples_for(&self, key: &str) -> Option<&ProfileSamples> {
        self.samples.iter().find(|s| s.profile.key == key)
    }

    pub fn total_retirees(&self) -> usize {
        self.global_outcomes.total()
    }

    pub fn retirements_at(&self, level: u8) -> usize {
        self.global_outcomes.get(level)
    }

    /// Share of all retirees that retired at `level`, in percent
    pub fn retirement_percent(&self, level: u8) -> f64 {
        let total = self.total_retirees();
        if total == 0 {
            return 0.0;
        }
        self.retirements_at(level) as f64 / total as f64 * 100.0
    }
}
