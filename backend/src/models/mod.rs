//! Domain models for the cohort ladder

pub mod agent;
pub mod hierarchy;
pub mod probe;
pub mod state;

// Re-exports
pub use agent::{Agent, AgentFactory, AgentId, AgentKind};
pub use hierarchy::{Hierarchy, HierarchyError, LevelCounts};
pub use probe::{default_profiles, ProbeProfile, ProbeRecord, ProfileId, SampleBook};
pub use state::SimulationState;
