//! Agent model
//!
//! One agent is one career. It enters the ladder at some level, ages one step
//! per surviving turn, may be promoted upward, and retires at the maximum
//! tenure. Its `history` is the level it held on every turn of its life,
//! which is the record the probe samples are built from.
//!
//! # Critical Invariants
//!
//! 1. `history.len() == age + 1` at every turn boundary
//! 2. `base_merit` and `kind` never change after creation
//! 3. `active` flips to false exactly once, at retirement

use crate::models::probe::ProfileId;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Globally unique (per simulation) agent identifier
pub type AgentId = u64;

/// Which population an agent was hired into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    /// Fixed-merit probe tracking one percentile marker
    Probe(ProfileId),

    /// Ordinary entrant with merit drawn at hire time
    Random,
}

impl AgentKind {
    /// Profile this agent reports to, if it is a probe
    pub fn profile(&self) -> Option<ProfileId> {
        match self {
            AgentKind::Probe(profile) => Some(*profile),
            AgentKind::Random => None,
        }
    }
}

/// A single career moving through the hierarchy
///
/// # Example
/// ```
/// use cohort_ladder_core::{Agent, AgentKind};
///
/// let mut agent = Agent::new(7, 1, 0, 0.5, AgentKind::Random);
/// assert_eq!(agent.history(), &[1]);
///
/// agent.age_one_turn();
/// agent.promote_to(2);
/// agent.record_level();
/// assert_eq!(agent.history(), &[1, 2]);
/// assert_eq!(agent.history().len() as u32, agent.age() + 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    id: AgentId,

    /// Current level, 1 is the bottom rung
    level: u8,

    /// Turns survived since creation
    age: u32,

    /// Merit in [0, 1], fixed for life
    base_merit: f64,

    kind: AgentKind,

    /// Level occupied on each turn of the agent's life, oldest first
    history: Vec<u8>,

    active: bool,
}

impl Agent {
    /// Create an agent at `level` who has already lived `age` turns
    ///
    /// The history is seeded with `age + 1` entries at `level`, so an age-0
    /// hire starts with the single entry `[level]` and a pre-aged seed agent
    /// already satisfies the history-length invariant.
    pub fn new(id: AgentId, level: u8, age: u32, base_merit: f64, kind: AgentKind) -> Self {
        Self {
            id,
            level,
            age,
            base_merit,
            kind,
            history: vec![level; age as usize + 1],
            active: true,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn base_merit(&self) -> f64 {
        self.base_merit
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn history(&self) -> &[u8] {
        &self.history
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True once the agent has served the full tenure
    pub fn is_due_for_retirement(&self, max_tenure: u32) -> bool {
        self.age >= max_tenure
    }

    /// Survive one more turn
    pub fn age_one_turn(&mut self) {
        self.age += 1;
    }

    /// Move to a new level (history is appended separately by `record_level`)
    pub fn promote_to(&mut self, level: u8) {
        self.level = level;
    }

    /// Append the current level to the history, once per surviving turn
    pub fn record_level(&mut self) {
        self.history.push(self.level);
    }

    /// Leave the hierarchy for good
    pub fn retire(&mut self) {
        self.active = false;
    }
}

/// Hands out agents with sequential ids
///
/// Every agent in a run, seeded or hired, comes from the same factory, so ids
/// are unique and increase in creation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentFactory {
    next_id: AgentId,
}

impl AgentFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next agent will receive
    pub fn next_id(&self) -> AgentId {
        self.next_id
    }

    /// Create an ordinary agent; draws its merit from `rng` (one draw)
    pub fn spawn_random(&mut self, level: u8, age: u32, rng: &mut RngManager) -> Agent {
        let merit = rng.next_f64();
        self.spawn(level, age, merit, AgentKind::Random)
    }

    /// Create a probe agent with a fixed merit (no draw)
    pub fn spawn_probe(&mut self, level: u8, age: u32, profile: ProfileId, merit: f64) -> Agent {
        self.spawn(level, age, merit, AgentKind::Probe(profile))
    }

    fn spawn(&mut self, level: u8, age: u32, merit: f64, kind: AgentKind) -> Agent {
        let id = self.next_id;
        self.next_id += 1;
        Agent::new(id, level, age, merit, kind)
    }
}
