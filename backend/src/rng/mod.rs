//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm for fast, reproducible draws.
//! CRITICAL: Every random decision in the ladder (ordinary-agent merit,
//! promotion noise) MUST go through this module so that a seed replays a run.

mod xorshift;

pub use xorshift::RngManager;
