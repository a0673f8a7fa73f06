//! Type conversion utilities for FFI boundary
//!
//! Converts between Python dicts and the orchestrator's config and report types.

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use std::collections::BTreeMap;

use crate::models::probe::ProbeProfile;
use crate::orchestrator::{CohortReport, CohortSeed, OrchestratorConfig, TurnResult};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict with a clear error message
fn extract_required<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Missing required field '{}'",
                key
            ))
        })?
        .extract()
}

/// Extract a field, falling back to `default` when the key is absent
fn extract_with_default<'py, T>(dict: &Bound<'py, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert a Python dict to `OrchestratorConfig`
///
/// Every key is optional:
///
/// ```python
/// {
///     "capacities": {1: 10, 2: 4, 3: 1},
///     "max_tenure": 4,
///     "luck_factor": 0.25,
///     "target_samples": 100,
///     "rng_seed": 42,
///     "max_turns": 100_000,
///     "probe_profiles": [{"key": "median", "label": "Median", "merit": 0.5}],
///     "initial_cohort": [{"level": 1, "age": 0, "count": 10}],
/// }
/// ```
///
/// Range checks happen later, in `Orchestrator::new`.
pub fn parse_orchestrator_config(py_config: &Bound<'_, PyDict>) -> PyResult<OrchestratorConfig> {
    let defaults = OrchestratorConfig::default();

    let capacities: BTreeMap<u8, usize> =
        extract_with_default(py_config, "capacities", defaults.capacities)?;

    let probe_profiles = match py_config.get_item("probe_profiles")? {
        Some(list) => {
            let list = list.downcast_into::<PyList>()?;
            list.iter()
                .map(|item| parse_probe_profile(item.downcast::<PyDict>()?))
                .collect::<PyResult<Vec<_>>>()?
        }
        None => defaults.probe_profiles,
    };

    let initial_cohort = match py_config.get_item("initial_cohort")? {
        Some(list) => {
            let list = list.downcast_into::<PyList>()?;
            list.iter()
                .map(|item| parse_cohort_seed(item.downcast::<PyDict>()?))
                .collect::<PyResult<Vec<_>>>()?
        }
        None => defaults.initial_cohort,
    };

    Ok(OrchestratorConfig {
        capacities,
        max_tenure: extract_with_default(py_config, "max_tenure", defaults.max_tenure)?,
        luck_factor: extract_with_default(py_config, "luck_factor", defaults.luck_factor)?,
        target_samples: extract_with_default(
            py_config,
            "target_samples",
            defaults.target_samples,
        )?,
        rng_seed: extract_with_default(py_config, "rng_seed", defaults.rng_seed)?,
        max_turns: extract_with_default(py_config, "max_turns", defaults.max_turns)?,
        probe_profiles,
        initial_cohort,
    })
}

fn parse_probe_profile(py_profile: &Bound<'_, PyDict>) -> PyResult<ProbeProfile> {
    let key: String = extract_required(py_profile, "key")?;
    let label: String = extract_with_default(py_profile, "label", key.clone())?;
    let merit: f64 = extract_required(py_profile, "merit")?;
    Ok(ProbeProfile::new(key, label, merit))
}

fn parse_cohort_seed(py_seed: &Bound<'_, PyDict>) -> PyResult<CohortSeed> {
    Ok(CohortSeed::new(
        extract_required(py_seed, "level")?,
        extract_required(py_seed, "age")?,
        extract_required(py_seed, "count")?,
    ))
}

// ========================================================================
// Result Converters
// ========================================================================

/// Convert TurnResult to Python dict
pub fn turn_result_to_py(py: Python, result: &TurnResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("turn", result.turn)?;
    dict.set_item("num_retired", result.num_retired)?;
    dict.set_item("num_recorded", result.num_recorded)?;
    dict.set_item("num_promoted", result.num_promoted)?;
    dict.set_item("num_hired", result.num_hired)?;
    dict.set_item("num_probes_hired", result.num_probes_hired)?;
    dict.set_item("population", result.population)?;

    Ok(dict.into())
}

/// Convert CohortReport to Python dict
///
/// `samples` maps profile key to a list of `{id, base_merit, history}`;
/// `shortfalls` maps profile key to the number of missing records and is
/// empty for a complete run.
pub fn report_to_py(py: Python, report: &CohortReport) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("luck_factor", report.luck_factor)?;
    dict.set_item("target_samples", report.target_samples)?;
    dict.set_item("turns", report.turns)?;
    dict.set_item("config_hash", &report.config_hash)?;
    dict.set_item("complete", report.is_complete())?;

    let samples = PyDict::new(py);
    for profile_samples in &report.samples {
        let records = PyList::empty(py);
        for record in &profile_samples.records {
            let py_record = PyDict::new(py);
            py_record.set_item("id", record.id)?;
            py_record.set_item("base_merit", record.base_merit)?;
            // u8 vectors would convert to `bytes`; widen so Python sees a list
            let history: Vec<u32> = record.history.iter().map(|&l| u32::from(l)).collect();
            py_record.set_item("history", history)?;
            records.append(py_record)?;
        }
        samples.set_item(&profile_samples.profile.key, records)?;
    }
    dict.set_item("samples", samples)?;

    let outcomes = PyDict::new(py);
    for (level, count) in report.global_outcomes.iter() {
        outcomes.set_item(level, count)?;
    }
    dict.set_item("global_outcomes", outcomes)?;

    let shortfalls = PyDict::new(py);
    for shortfall in report.shortfalls() {
        shortfalls.set_item(&shortfall.profile, shortfall.missing())?;
    }
    dict.set_item("shortfalls", shortfalls)?;

    Ok(dict.into())
}
