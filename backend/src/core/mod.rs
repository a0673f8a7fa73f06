//! Turn bookkeeping shared by the orchestrator

pub mod turns;
