//! Run configuration
//!
//! Everything a host supplies for one run: the mode with its strategy
//! payload, the knob bundle, and an optional seed. Config documents are JSON
//! (the CLI reads them from disk, the FFI layer builds them from dicts).
//!
//! # Example
//!
//! ```rust
//! use arbor_trip_core::orchestrator::{ModeConfig, RunConfig};
//!
//! let config = RunConfig::from_json(r#"{
//!     "mode": { "mode": "gift", "near": "explore", "far": "witness", "attar_limit": 15 },
//!     "knobs": { "watchful": 230, "num_trials": 1000 },
//!     "rng_seed": 7
//! }"#).unwrap();
//!
//! assert!(matches!(config.mode, ModeConfig::Gift(_)));
//! assert_eq!(config.knobs.num_trials, 1000);
//! ```

use super::engine::SimulationError;
use crate::machine::{
    GiftMachine, GiftPlan, SpyMachine, SpyPlan, StagedMachine, StagedPlan, TripMachine,
};
use crate::strategy::{FarChoice, NearChoice};
use serde::{Deserialize, Serialize};

/// Skill values and run-wide settings.
///
/// The core does not validate these; hosts are expected to supply
/// non-negative skills. Difficulty bases are fixed per check and never zero;
/// `gear_diff` may be zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Knobs {
    pub watchful: f64,
    pub persuasive: f64,
    pub dangerous: f64,
    /// Subtracted from watchful for gear-sensitive checks
    pub gear_diff: f64,
    /// Bulk exchange chance, in percent
    pub rare_chance: f64,
    pub num_trials: u64,
}

impl Default for Knobs {
    fn default() -> Self {
        Self {
            watchful: 0.0,
            persuasive: 0.0,
            dangerous: 0.0,
            gear_diff: 0.0,
            rare_chance: 0.0,
            num_trials: 10_000,
        }
    }
}

impl Knobs {
    /// `rare_chance` as a probability.
    pub fn rare_probability(&self) -> f64 {
        self.rare_chance / 100.0
    }
}

/// Mode selection with its configuration payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ModeConfig {
    Spy(SpyPlan),
    Gift(GiftPlan),
    Loop(StagedPlan),
    Grind(StagedPlan),
}

impl ModeConfig {
    /// Resolve a mode selector to its preset.
    ///
    /// # Errors
    ///
    /// `UnknownMode` for any selector other than `spy`, `spy-linger`,
    /// `gift`, `loop` or `grind`.
    pub fn from_selector(selector: &str) -> Result<Self, SimulationError> {
        match selector {
            "spy" => Ok(ModeConfig::Spy(SpyPlan::standard())),
            "spy-linger" | "spy_linger" => Ok(ModeConfig::Spy(SpyPlan::linger())),
            "gift" => Ok(ModeConfig::Gift(GiftPlan::default())),
            "loop" => Ok(ModeConfig::Loop(StagedPlan::looping())),
            "grind" => Ok(ModeConfig::Grind(StagedPlan::grind())),
            other => Err(SimulationError::UnknownMode(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModeConfig::Spy(_) => "spy",
            ModeConfig::Gift(_) => "gift",
            ModeConfig::Loop(_) => "loop",
            ModeConfig::Grind(_) => "grind",
        }
    }

    /// Replace the near/far strategy. Spy mode has none and ignores this.
    pub fn with_strategy(mut self, near: Option<NearChoice>, far: Option<FarChoice>) -> Self {
        match &mut self {
            ModeConfig::Spy(_) => {}
            ModeConfig::Gift(plan) => {
                plan.near = near.unwrap_or(plan.near);
                plan.far = far.unwrap_or(plan.far);
            }
            ModeConfig::Loop(plan) | ModeConfig::Grind(plan) => {
                plan.near = near.unwrap_or(plan.near);
                plan.far = far.unwrap_or(plan.far);
            }
        }
        self
    }

    /// Replace the attar stock that starts converting. Spy mode ignores this.
    pub fn with_attar_limit(mut self, attar_limit: i64) -> Self {
        match &mut self {
            ModeConfig::Spy(_) => {}
            ModeConfig::Gift(plan) => plan.attar_limit = attar_limit,
            ModeConfig::Loop(plan) | ModeConfig::Grind(plan) => plan.attar_limit = attar_limit,
        }
        self
    }

    /// Build the trip machine, precomputing every sampler from `knobs`.
    pub fn build(&self, knobs: &Knobs) -> Box<dyn TripMachine> {
        match self {
            ModeConfig::Spy(plan) => Box::new(SpyMachine::new(*plan, knobs)),
            ModeConfig::Gift(plan) => Box::new(GiftMachine::new(*plan, knobs)),
            ModeConfig::Loop(plan) | ModeConfig::Grind(plan) => {
                Box::new(StagedMachine::new(*plan, knobs))
            }
        }
    }
}

/// Complete configuration of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub mode: ModeConfig,
    #[serde(default)]
    pub knobs: Knobs,
    /// Seed for the xorshift generator (None = fresh entropy)
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl RunConfig {
    pub fn new(mode: ModeConfig, knobs: Knobs) -> Self {
        Self {
            mode,
            knobs,
            rng_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Parse a JSON config document.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the document is malformed, and `UnknownMode` or
    /// `UnknownStrategy` when a selector names nothing this engine knows.
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| SimulationError::InvalidConfig(format!("Malformed config: {}", e)))?;
        check_selectors(&value)?;
        serde_json::from_value(value)
            .map_err(|e| SimulationError::InvalidConfig(format!("Invalid config: {}", e)))
    }
}

/// Surface unknown mode and strategy names as configuration errors rather
/// than generic deserialization failures.
fn check_selectors(value: &serde_json::Value) -> Result<(), SimulationError> {
    let Some(mode) = value.get("mode") else {
        return Ok(());
    };
    if let Some(selector) = mode.get("mode").and_then(|m| m.as_str()) {
        if !matches!(selector, "spy" | "gift" | "loop" | "grind") {
            return Err(SimulationError::UnknownMode(selector.to_string()));
        }
    }
    if let Some(near) = mode.get("near").and_then(|n| n.as_str()) {
        near.parse::<NearChoice>()?;
    }
    if let Some(far) = mode.get("far").and_then(|f| f.as_str()) {
        far.parse::<FarChoice>()?;
    }
    Ok(())
}
