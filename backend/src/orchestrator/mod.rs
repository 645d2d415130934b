//! Orchestrator - configuration, trial runner and run snapshots
//!
//! See `engine.rs` for the trial loop.

pub mod checkpoint;
pub mod config;
pub mod engine;

// Re-export main types for convenience
pub use config::{Knobs, ModeConfig, RunConfig};
pub use engine::{
    simulate, simulate_with, RunOutcome, SimulationError, TrialRunner, ENTRY_EXIT_ACTIONS,
};

// Re-export checkpoint types
pub use checkpoint::{compute_config_hash, validate_snapshot, RunSnapshot};
