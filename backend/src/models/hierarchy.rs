//! Fixed-capacity hierarchy
//!
//! Levels run from 1 (bottom) to `top_level()`. Each level has a fixed number
//! of seats. Occupancy can drop below capacity during a turn but never rises
//! above it at a turn boundary.

use crate::models::agent::Agent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors building a hierarchy from a level → seats map
#[derive(Debug, Error, PartialEq)]
pub enum HierarchyError {
    #[error("hierarchy must have at least one level")]
    Empty,

    #[error("levels must be numbered 1..={expected_top} without gaps, found level {found}")]
    NonContiguous { expected_top: u8, found: u8 },

    #[error("level {level} has zero capacity")]
    ZeroCapacity { level: u8 },
}

/// Seat counts per level
///
/// # Example
/// ```
/// use cohort_ladder_core::Hierarchy;
/// use std::collections::BTreeMap;
///
/// let caps = BTreeMap::from([(1, 10), (2, 4), (3, 1)]);
/// let hierarchy = Hierarchy::from_map(&caps).unwrap();
/// assert_eq!(hierarchy.top_level(), 3);
/// assert_eq!(hierarchy.capacity(2), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchy {
    /// `capacities[i]` is the seat count of level `i + 1`
    capacities: Vec<usize>,
}

impl Hierarchy {
    /// Build from a map keyed by level
    ///
    /// Levels must be exactly `1..=N` and every capacity must be positive; a
    /// zero-seat level would stall promotion forever.
    pub fn from_map(capacities: &BTreeMap<u8, usize>) -> Result<Self, HierarchyError> {
        if capacities.is_empty() {
            return Err(HierarchyError::Empty);
        }

        let expected_top = u8::try_from(capacities.len()).unwrap_or(u8::MAX);
        let mut seats = Vec::with_capacity(capacities.len());
        for (position, (&level, &capacity)) in capacities.iter().enumerate() {
            if usize::from(level) != position + 1 {
                return Err(HierarchyError::NonContiguous {
                    expected_top,
                    found: level,
                });
            }
            if capacity == 0 {
                return Err(HierarchyError::ZeroCapacity { level });
            }
            seats.push(capacity);
        }

        Ok(Self { capacities: seats })
    }

    /// Highest level number
    pub fn top_level(&self) -> u8 {
        self.capacities.len() as u8
    }

    /// Seat count of `level`, zero for levels outside the hierarchy
    pub fn capacity(&self, level: u8) -> usize {
        if level == 0 {
            return 0;
        }
        self.capacities
            .get(usize::from(level) - 1)
            .copied()
            .unwrap_or(0)
    }

    pub fn contains(&self, level: u8) -> bool {
        level >= 1 && level <= self.top_level()
    }

    /// Total seats across all levels
    pub fn total_capacity(&self) -> usize {
        self.capacities.iter().sum()
    }

    /// Count active agents per level
    pub fn occupancy<'a>(&self, agents: impl IntoIterator<Item = &'a Agent>) -> LevelCounts {
        let mut counts = LevelCounts::new(self.top_level());
        for agent in agents.into_iter().filter(|a| a.is_active()) {
            counts.add(agent.level());
        }
        counts
    }
}

/// A count per level, indexed by level number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    counts: Vec<usize>,
}

impl LevelCounts {
    pub fn new(top_level: u8) -> Self {
        Self {
            counts: vec![0; usize::from(top_level)],
        }
    }

    pub fn get(&self, level: u8) -> usize {
        if level == 0 {
            return 0;
        }
        self.counts
            .get(usize::from(level) - 1)
            .copied()
            .unwrap_or(0)
    }

    pub fn add(&mut self, level: u8) {
        if let Some(slot) = self.slot_mut(level) {
            *slot += 1;
        }
    }

    pub fn remove(&mut self, level: u8) {
        if let Some(slot) = self.slot_mut(level) {
            *slot = slot.saturating_sub(1);
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(level, count)` pairs from level 1 upward
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u8 + 1, count))
    }

    fn slot_mut(&mut self, level: u8) -> Option<&mut usize> {
        if level == 0 {
            return None;
        }
        self.counts.get_mut(usize::from(level) - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::agent::AgentKind;

    #[test]
    fn test_rejects_gap_in_levels() {
        let caps = BTreeMap::from([(1, 10), (3, 1)]);
        assert_eq!(
            Hierarchy::from_map(&caps),
            Err(HierarchyError::NonContiguous {
                expected_top: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let caps = BTreeMap::from([(1, 10), (2, 0)]);
        assert_eq!(
            Hierarchy::from_map(&caps),
            Err(HierarchyError::ZeroCapacity { level: 2 })
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            Hierarchy::from_map(&BTreeMap::new()),
            Err(HierarchyError::Empty)
        );
    }

    #[test]
    fn test_occupancy_skips_retired_agents() {
        let hierarchy = Hierarchy::from_map(&BTreeMap::from([(1, 3), (2, 1)])).unwrap();
        let mut retired = Agent::new(2, 2, 4, 0.1, AgentKind::Random);
        retired.retire();
        let agents = vec![
            Agent::new(0, 1, 0, 0.1, AgentKind::Random),
            Agent::new(1, 1, 0, 0.2, AgentKind::Random),
            retired,
        ];

        let counts = hierarchy.occupancy(&agents);
        assert_eq!(counts.get(1), 2);
        assert_eq!(counts.get(2), 0);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_level_counts_out_of_range_is_noop() {
        let mut counts = LevelCounts::new(2);
        counts.add(0);
        counts.add(3);
        counts.remove(1);
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.get(5), 0);
    }
}
