//! Orchestrator configuration
//!
//! Every constant of a run (capacities, tenure, probe markers, ceiling, seed,
//! starting population) is an input here rather than baked into the engine.
//! `OrchestratorConfig::default()` reproduces the reference five-level ladder.

use crate::models::hierarchy::Hierarchy;
use crate::models::probe::{default_profiles, ProbeProfile};
use crate::orchestrator::SimulationError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};

/// Default maximum tenure: agents retire once they have aged 4 turns
pub const DEFAULT_MAX_TENURE: u32 = 4;

/// Largest accepted tenure; bounds the length of every agent's history
pub const MAX_TENURE_LIMIT: u32 = 1_000;

/// Default non-convergence guard
pub const DEFAULT_MAX_TURNS: usize = 100_000;

/// Default probe sample target per profile
pub const DEFAULT_TARGET_SAMPLES: usize = 10_000;

/// Default RNG seed
pub const DEFAULT_SEED: u64 = 42;

/// A group of identical agents placed before the first turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSeed {
    pub level: u8,
    pub age: u32,
    pub count: usize,
}

impl CohortSeed {
    pub fn new(level: u8, age: u32, count: usize) -> Self {
        Self { level, age, count }
    }
}

/// Complete orchestrator configuration
///
/// Missing fields fall back to the defaults when deserialized, so a config
/// file only needs the values it changes.
///
/// # Example
///
/// ```rust
/// use cohort_ladder_core::OrchestratorConfig;
/// use std::collections::BTreeMap;
///
/// let config = OrchestratorConfig {
///     capacities: BTreeMap::from([(1, 10), (2, 4), (3, 1)]),
///     target_samples: 5,
///     initial_cohort: Vec::new(),
///     ..OrchestratorConfig::default()
/// };
/// assert_eq!(config.max_tenure, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Seats per level, levels numbered `1..=N`
    pub capacities: BTreeMap<u8, usize>,

    /// Age at which agents retire
    pub max_tenure: u32,

    /// Weight of noise against merit in promotion scores, in [0, 1]
    pub luck_factor: f64,

    /// Records to collect per probe profile
    pub target_samples: usize,

    /// Seed for the run's private RNG
    pub rng_seed: u64,

    /// Turn ceiling for runs whose targets are never met
    pub max_turns: usize,

    /// Probe markers, in injection priority order
    pub probe_profiles: Vec<ProbeProfile>,

    /// Population present before turn 1, created in listed order
    pub initial_cohort: Vec<CohortSeed>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            capacities: BTreeMap::from([(1, 1875), (2, 375), (3, 75), (4, 15), (5, 3)]),
            max_tenure: DEFAULT_MAX_TENURE,
            luck_factor: 0.0,
            target_samples: DEFAULT_TARGET_SAMPLES,
            rng_seed: DEFAULT_SEED,
            max_turns: DEFAULT_MAX_TURNS,
            probe_profiles: default_profiles(),
            initial_cohort: default_initial_cohort(),
        }
    }
}

/// Steady-state-like starting population for the default ladder
///
/// Fills every seat of `{1:1875, 2:375, 3:75, 4:15, 5:3}`, top level first.
pub fn default_initial_cohort() -> Vec<CohortSeed> {
    vec![
        CohortSeed::new(5, 4, 3),
        CohortSeed::new(4, 4, 12),
        CohortSeed::new(4, 3, 3),
        CohortSeed::new(3, 4, 54),
        CohortSeed::new(3, 3, 15),
        CohortSeed::new(3, 2, 6),
        CohortSeed::new(2, 1, 45),
        CohortSeed::new(2, 2, 87),
        CohortSeed::new(2, 3, 87),
        CohortSeed::new(2, 4, 156),
        CohortSeed::new(1, 0, 450),
        CohortSeed::new(1, 1, 414),
        CohortSeed::new(1, 2, 375),
        CohortSeed::new(1, 3, 336),
        CohortSeed::new(1, 4, 300),
    ]
}

impl OrchestratorConfig {
    /// Copy of this config with a different luck factor
    pub fn with_luck(&self, luck_factor: f64) -> Self {
        Self {
            luck_factor,
            ..self.clone()
        }
    }

    /// Check every field and build the hierarchy
    pub fn validate(&self) -> Result<Hierarchy, SimulationError> {
        if !(0.0..=1.0).contains(&self.luck_factor) {
            return Err(invalid(format!(
                "luck_factor must be within [0, 1], got {}",
                self.luck_factor
            )));
        }

        if self.target_samples == 0 {
            return Err(invalid("target_samples must be > 0"));
        }

        if self.max_tenure == 0 || self.max_tenure > MAX_TENURE_LIMIT {
            return Err(invalid(format!(
                "max_tenure must be within 1..={}, got {}",
                MAX_TENURE_LIMIT, self.max_tenure
            )));
        }

        if self.max_turns == 0 {
            return Err(invalid("max_turns must be > 0"));
        }

        let hierarchy = Hierarchy::from_map(&self.capacities)?;

        if self.probe_profiles.is_empty() {
            return Err(invalid("at least one probe profile is required"));
        }

        let mut keys = HashSet::new();
        for profile in &self.probe_profiles {
            if !keys.insert(profile.key.as_str()) {
                return Err(invalid(format!("duplicate probe profile: {}", profile.key)));
            }
            if !(0.0..=1.0).contains(&profile.merit) {
                return Err(invalid(format!(
                    "probe profile {} has merit {} outside [0, 1]",
                    profile.key, profile.merit
                )));
            }
        }

        let mut seeded: BTreeMap<u8, usize> = BTreeMap::new();
        for group in &self.initial_cohort {
            if !hierarchy.contains(group.level) {
                return Err(invalid(format!(
                    "initial cohort level {} is outside 1..={}",
                    group.level,
                    hierarchy.top_level()
                )));
            }
            if group.age > self.max_tenure {
                return Err(invalid(format!(
                    "initial cohort age {} exceeds max_tenure {}",
                    group.age, self.max_tenure
                )));
            }
            let placed = seeded.entry(group.level).or_default();
            *placed = placed
                .checked_add(group.count)
                .filter(|&total| total <= hierarchy.capacity(group.level))
                .ok_or_else(|| {
                    invalid(format!(
                        "initial cohort overfills level {} (capacity {})",
                        group.level,
                        hierarchy.capacity(group.level)
                    ))
                })?;
        }

        Ok(hierarchy)
    }

    /// SHA-256 of the canonical JSON form of this config
    pub fn config_hash(&self) -> Result<String, SimulationError> {
        compute_config_hash(self)
    }
}

fn invalid(msg: impl Into<String>) -> SimulationError {
    SimulationError::InvalidConfiguration(msg.into())
}

/// Compute a deterministic SHA-256 hash of any serializable config
///
/// Object keys are sorted before hashing so the digest does not depend on map
/// iteration order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    use serde_json::Value;

    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SimulationError::Serialization(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
