//! Checkpoint - Run Snapshots
//!
//! A run snapshot pairs a [`RunOutcome`] with the config that produced it
//! and a fingerprint of that config, so stored results can be matched back
//! to their knob sets and replayed from the recorded seed.
//!
//! # Critical Invariants
//!
//! - **Determinism**: same config + same seed → same outcome
//! - **Config Matching**: the fingerprint ignores key order

use super::config::RunConfig;
use super::engine::{RunOutcome, SimulationError, ENTRY_EXIT_ACTIONS};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Outcome of a run together with its config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub config: RunConfig,

    /// SHA256 hash of the canonical config JSON
    pub config_hash: String,

    pub outcome: RunOutcome,
}

impl RunSnapshot {
    pub fn new(config: &RunConfig, outcome: RunOutcome) -> Result<Self, SimulationError> {
        Ok(Self {
            config: config.clone(),
            config_hash: compute_config_hash(config)?,
            outcome,
        })
    }

    /// Config to replay this run exactly: the stored config with its seed pinned.
    pub fn replay_config(&self) -> RunConfig {
        let mut config = self.config.clone();
        config.rng_seed = self.outcome.seed.or(config.rng_seed);
        config
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SimulationError::SerializationError(format!("Snapshot serialization failed: {}", e))
        })
    }

    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json).map_err(|e| {
            SimulationError::SerializationError(format!("Snapshot deserialization failed: {}", e))
        })
    }
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of config
///
/// Uses canonical JSON serialization with sorted keys so the hash does not
/// depend on field order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
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
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validate snapshot integrity
///
/// Checks:
/// - Config fingerprint matches the stored config
/// - Trip counter equals the configured trial count
/// - Every trip was charged its entry/exit actions
/// - No trip ended with budget left over
pub fn validate_snapshot(snapshot: &RunSnapshot) -> Result<(), SimulationError> {
    let expected_hash = compute_config_hash(&snapshot.config)?;
    if expected_hash != snapshot.config_hash {
        return Err(SimulationError::InvalidConfig(format!(
            "Config hash mismatch: expected {}, got {}",
            expected_hash, snapshot.config_hash
        )));
    }

    let state = &snapshot.outcome.state;
    let trials = snapshot.config.knobs.num_trials;
    if state.num_trips != trials {
        return Err(SimulationError::InvalidConfig(format!(
            "Trip counter {} does not match {} trials",
            state.num_trips, trials
        )));
    }

    if snapshot.outcome.actions < trials * ENTRY_EXIT_ACTIONS {
        return Err(SimulationError::InvalidConfig(format!(
            "{} actions cannot cover {} trips",
            snapshot.outcome.actions, trials
        )));
    }

    if trials > 0 && state.permission > 0 {
        return Err(SimulationError::InvalidConfig(format!(
            "Last trip ended with {} permission left",
            state.permission
        )));
    }

    Ok(())
}
