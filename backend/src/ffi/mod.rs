//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings exposing the cohort orchestrator to Python notebooks.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: one class, plain dicts in and out
//! 2. **Defaults on the Rust side**: missing config keys use `OrchestratorConfig::default()`
//! 3. **Safe errors**: configuration errors become `ValueError`
//! 4. **No references**: Python gets copies, never references to Rust state

pub mod orchestrator;
pub mod types;
