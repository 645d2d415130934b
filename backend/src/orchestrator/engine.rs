//! Orchestrator Engine
//!
//! Runs one configured mode for N trials against a single accumulating
//! [`ResourceState`].
//!
//! # Architecture
//!
//! ```text
//! setup:   RunConfig → ModeConfig::build (samplers precomputed once)
//! per trip:
//!   1. Charge entry/exit actions (+2, no budget)
//!   2. Reset permission to the mode's trip budget
//!   3. Re-derive region/stage, pay entry cost
//!   4. Step the machine until permission is exhausted
//! finish:  num_trips += trials (once)
//! ```
//!
//! # Critical Invariants
//!
//! 1. Trips run sequentially on a shared state; region, stage and street may
//!    carry from one trip into the next
//! 2. Nothing but `permission` is reset between trips
//! 3. Zero trials leave the state untouched and count zero actions

use super::config::RunConfig;
use crate::machine::TripMachine;
use crate::models::ResourceState;
use crate::rng::{RngManager, UniformSource};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace};

/// Actions charged per trip for entering and leaving.
pub const ENTRY_EXIT_ACTIONS: u64 = 2;

// ============================================================================
// Errors
// ============================================================================

/// Setup errors. All of them surface before the first trial runs.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    #[error("Unknown {region} strategy: {choice}")]
    UnknownStrategy { region: &'static str, choice: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Trial Runner
// ============================================================================

/// Final state of a run plus its action count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub state: ResourceState,
    pub actions: u64,
    /// Seed of the generator used, when the run owned one
    pub seed: Option<u64>,
}

/// Drives a trip machine for a number of trials.
///
/// # Example
///
/// ```rust
/// use arbor_trip_core::machine::{SpyMachine, SpyPlan};
/// use arbor_trip_core::orchestrator::{Knobs, TrialRunner};
/// use arbor_trip_core::rng::ScriptedRng;
///
/// let knobs = Knobs { watchful: 75.0, ..Default::default() };
/// let mut machine = SpyMachine::new(SpyPlan::standard(), &knobs);
/// let mut rng = ScriptedRng::constant(0.0);
///
/// let (state, actions) = TrialRunner::new(&mut rng).run(&mut machine, 1);
/// assert_eq!(actions, 7);
/// assert_eq!(state.pennies, 2500);
/// ```
pub struct TrialRunner<'r> {
    rng: &'r mut dyn UniformSource,
}

impl<'r> TrialRunner<'r> {
    pub fn new(rng: &'r mut dyn UniformSource) -> Self {
        Self { rng }
    }

    /// Run `trials` trips from a fresh state.
    pub fn run(&mut self, machine: &mut dyn TripMachine, trials: u64) -> (ResourceState, u64) {
        self.run_from(ResourceState::new(), machine, trials)
    }

    /// Run `trials` trips on top of an existing state.
    ///
    /// The trip counter is advanced by `trials` once, at the end, so a fresh
    /// state ends with `num_trips == trials` and zero trials change nothing.
    pub fn run_from(
        &mut self,
        mut state: ResourceState,
        machine: &mut dyn TripMachine,
        trials: u64,
    ) -> (ResourceState, u64) {
        let mut actions = 0u64;

        for trip in 0..trials {
            actions += ENTRY_EXIT_ACTIONS;
            state.permission = machine.trip_budget();
            machine.begin_trip(&mut state);

            let trip_start = actions;
            while state.permission > 0 {
                let step = machine.step(&mut state, &mut *self.rng);
                state.permission -= step.budget;
                actions += step.actions;
            }
            trace!(
                trip,
                actions = actions - trip_start,
                attar = state.attar,
                "trip complete"
            );
        }

        state.num_trips += trials;
        (state, actions)
    }
}

// ============================================================================
// Entry Points
// ============================================================================

/// Run a configured simulation with its own xorshift generator.
///
/// Uses `config.rng_seed` when set, otherwise fresh entropy; either way the
/// seed lands in the outcome.
pub fn simulate(config: &RunConfig) -> RunOutcome {
    let (mut rng, seed) = match config.rng_seed {
        Some(seed) => (RngManager::new(seed), seed),
        None => RngManager::from_entropy(),
    };
    run_seeded(config, &mut rng, Some(seed))
}

/// Run a configured simulation against an injected generator.
pub fn simulate_with(config: &RunConfig, rng: &mut dyn UniformSource) -> RunOutcome {
    run_seeded(config, rng, None)
}

/// `seed` is the resolved seed of `rng`, when known.
fn run_seeded(config: &RunConfig, rng: &mut dyn UniformSource, seed: Option<u64>) -> RunOutcome {
    let trials = config.knobs.num_trials;
    let mut machine = config.mode.build(&config.knobs);
    debug!(mode = config.mode.name(), trials, seed = ?seed, "starting run");

    let (state, actions) = TrialRunner::new(rng).run(machine.as_mut(), trials);

    info!(
        mode = config.mode.name(),
        trips = state.num_trips,
        actions,
        pennies = state.pennies,
        "run complete"
    );
    RunOutcome {
        state,
        actions,
        seed,
    }
}
