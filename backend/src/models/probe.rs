//! Probe profiles and the samples collected for them
//!
//! A probe profile is a fixed merit value standing in for a percentile of the
//! population (the median performer, the top 10%, ...). Probe agents are hired
//! with that merit and, when they retire, their full career is recorded until
//! the profile has `target` records.

use crate::models::agent::{Agent, AgentId};
use serde::{Deserialize, Serialize};

/// Index of a profile in the configured profile list
///
/// The list order is also the priority order for scarce level-1 vacancies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProfileId(pub usize);

/// One percentile marker to sample careers for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeProfile {
    /// Short tag, e.g. `"top_10"`
    pub key: String,

    /// Human-readable label used in exported rows
    pub label: String,

    /// Fixed merit every probe of this profile is hired with
    pub merit: f64,
}

impl ProbeProfile {
    pub fn new(key: impl Into<String>, label: impl Into<String>, merit: f64) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            merit,
        }
    }
}

/// The five reference percentile markers, in injection priority order
pub fn default_profiles() -> Vec<ProbeProfile> {
    vec![
        ProbeProfile::new("median", "Median Performer (50th)", 0.50),
        ProbeProfile::new("top_25", "Top 25th Percentile", 0.75),
        ProbeProfile::new("top_10", "Top 10th Percentile", 0.90),
        ProbeProfile::new("top_75", "Lower 25th Percentile", 0.25),
        ProbeProfile::new("top_1", "Top 1", 1.0),
    ]
}

/// Snapshot of a retired probe's career
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeRecord {
    pub id: AgentId,
    pub base_merit: f64,
    /// Level held at each age, starting at age 0
    pub history: Vec<u8>,
}

impl From<&Agent> for ProbeRecord {
    fn from(agent: &Agent) -> Self {
        ProbeRecord {
            id: agent.id(),
            base_merit: agent.base_merit(),
            history: agent.history().to_vec(),
        }
    }
}

/// Per-profile sample collection, capped at `target` records each
///
/// Counts only ever grow, and never past the target: once a profile is full,
/// further retirements of that profile are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleBook {
    target: usize,
    records: Vec<Vec<ProbeRecord>>,
}

impl SampleBook {
    pub fn new(num_profiles: usize, target: usize) -> Self {
        Self {
            target,
            records: vec![Vec::new(); num_profiles],
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Records collected so far for `profile`
    pub fn count(&self, profile: ProfileId) -> usize {
        self.records.get(profile.0).map_or(0, Vec::len)
    }

    /// True while `profile` is below its target
    pub fn needs(&self, profile: ProfileId) -> bool {
        self.count(profile) < self.target
    }

    /// True once every profile has reached the target
    pub fn all_met(&self) -> bool {
        self.records.iter().all(|r| r.len() >= self.target)
    }

    /// Record a retiring probe; returns false when the profile is already full
    pub fn record(&mut self, profile: ProfileId, agent: &Agent) -> bool {
        let target = self.target;
        match self.records.get_mut(profile.0) {
            Some(records) if records.len() < target => {
                records.push(ProbeRecord::from(agent));
                true
            }
            _ => false,
        }
    }

    pub fn records(&self, profile: ProfileId) -> &[ProbeRecord] {
        self.records.get(profile.0).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::agent::AgentKind;

    #[test]
    fn test_record_stops_at_target() {
        let mut book = SampleBook::new(2, 2);
        let agent = Agent::new(1, 1, 4, 0.5, AgentKind::Probe(ProfileId(0)));

        assert!(book.record(ProfileId(0), &agent));
        assert!(book.record(ProfileId(0), &agent));
        assert!(!book.record(ProfileId(0), &agent));

        assert_eq!(book.count(ProfileId(0)), 2);
        assert!(!book.needs(ProfileId(0)));
        assert!(book.needs(ProfileId(1)));
        assert!(!book.all_met());
    }

    #[test]
    fn test_record_snapshots_history() {
        let mut book = SampleBook::new(1, 5);
        let agent = Agent::new(9, 2, 2, 0.9, AgentKind::Probe(ProfileId(0)));
        book.record(ProfileId(0), &agent);

        let record = &book.records(ProfileId(0))[0];
        assert_eq!(record.id, 9);
        assert_eq!(record.history, vec![2, 2, 2]);
    }

    #[test]
    fn test_default_profiles_priority_order() {
        let keys: Vec<_> = default_profiles().into_iter().map(|p| p.key).collect();
        assert_eq!(keys, vec!["median", "top_25", "top_10", "top_75", "top_1"]);
    }
}
