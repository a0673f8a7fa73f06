//! PyO3 wrapper for Orchestrator
//!
//! This module provides the Python interface to the Rust orchestrator.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{parse_orchestrator_config, report_to_py, turn_result_to_py};
use crate::orchestrator::{Orchestrator as RustOrchestrator, OrchestratorConfig, SimulationError};

/// Python wrapper for Rust Orchestrator
///
/// # Example (from Python)
///
/// ```python
/// from cohort_ladder_core import Orchestrator
///
/// orch = Orchestrator({"luck_factor": 0.5, "target_samples": 1000})
/// report = orch.run()
/// print(report["turns"], report["global_outcomes"])
/// ```
#[pyclass(name = "Orchestrator")]
pub struct PyOrchestrator {
    inner: RustOrchestrator,
}

#[pymethods]
impl PyOrchestrator {
    /// Create a new orchestrator from an optional configuration dict
    ///
    /// # Errors
    ///
    /// Raises ValueError if a value has the wrong type or is out of range.
    #[new]
    #[pyo3(signature = (config=None))]
    fn py_new(config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let rust_config = match config {
            Some(dict) => parse_orchestrator_config(dict)?,
            None => OrchestratorConfig::default(),
        };

        let inner = RustOrchestrator::new(rust_config).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Failed to create orchestrator: {}",
                e
            ))
        })?;

        Ok(PyOrchestrator { inner })
    }

    /// Same as the constructor, kept for `Orchestrator.new(config)` callers
    #[staticmethod]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        Self::py_new(config)
    }

    /// Execute one turn and return its counters
    fn step(&mut self, py: Python) -> PyResult<Py<PyDict>> {
        let result = self.inner.step();
        turn_result_to_py(py, &result)
    }

    /// Run until every profile meets its target or the ceiling is reached
    ///
    /// A run that hits the ceiling still returns its partial report, with
    /// `complete` set to False and `shortfalls` listing missing records.
    fn run(&mut self, py: Python) -> PyResult<Py<PyDict>> {
        match self.inner.run() {
            Ok(report) => report_to_py(py, &report),
            Err(SimulationError::NonConvergence { report, .. }) => report_to_py(py, &report),
            Err(e) => Err(PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Run failed: {}",
                e
            ))),
        }
    }

    /// Report of everything collected so far
    fn report(&self, py: Python) -> PyResult<Py<PyDict>> {
        report_to_py(py, &self.inner.report())
    }

    /// Turns completed so far
    fn current_turn(&self) -> usize {
        self.inner.current_turn()
    }

    /// Active agents
    fn population_size(&self) -> usize {
        self.inner.state().num_agents()
    }
}
