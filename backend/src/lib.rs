//! Arbor Trip Core - Rust Engine
//!
//! Monte-Carlo engine estimating resource yield per action for repeated
//! trips through a two-region area, with deterministic execution when seeded.
//!
//! # Architecture
//!
//! - **challenge**: Skill checks → success probability and change points
//! - **models**: Domain types (ResourceState, ResourceDelta)
//! - **sampler**: Per-action outcome samplers
//! - **strategy**: Near/far strategy choices and the samplers they build
//! - **machine**: Trip state machines (spy, gift, loop/grind)
//! - **orchestrator**: Run configuration and the trial loop
//! - **report**: Per-action and per-trip rates for display
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All resource values are i64 (pennies for currency)
//! 2. All randomness flows through an injected [`rng::UniformSource`]
//! 3. Setup errors surface before the first trial; a run itself never fails
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod challenge;
pub mod machine;
pub mod models;
pub mod orchestrator;
pub mod report;
pub mod rng;
pub mod sampler;
pub mod strategy;

// Re-exports for convenience
pub use challenge::{challenge, Challenge};
pub use machine::{Phase, Region, Stage, Step, TripMachine};
pub use models::{ResourceDelta, ResourceField, ResourceState};
pub use orchestrator::{
    simulate, simulate_with, Knobs, ModeConfig, RunConfig, RunOutcome, RunSnapshot,
    SimulationError, TrialRunner,
};
pub use report::RunReport;
pub use rng::{RngManager, ScriptedRng, UniformSource};
pub use strategy::{FarChoice, NearChoice};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn arbor_trip_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::simulate::simulate, m)?)?;
    Ok(())
}
