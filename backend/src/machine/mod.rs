//! Trip State Machines
//!
//! A trip machine sequences one trip: each [`TripMachine::step`] performs
//! exactly one action (or one fast-forwarded batch) against the run state
//! and reports what it cost. The runner owns the loop that drains the
//! trip's budget.
//!
//! # Machines
//!
//! - **Spy** ([`SpyMachine`]): one region, one check fired every action
//! - **Gift** ([`GiftMachine`]): near/far regions with a converting latch
//! - **Staged** ([`StagedMachine`]): the six-stage loop/grind machine
//!
//! # Critical Invariants
//!
//! 1. Every step counts at least one action
//! 2. Only the crossing into the far region is free of budget
//! 3. Region membership is re-evaluated before any stage logic

pub mod gift;
pub mod phase;
pub mod spy;
pub mod staged;

pub use gift::{GiftMachine, GiftPlan, GIFT_TRIP_BUDGET};
pub use phase::{Phase, Region, Stage};
pub use spy::{SpyMachine, SpyPlan};
pub use staged::{StagedMachine, StagedPlan};

use crate::models::ResourceState;
use crate::rng::UniformSource;

/// Cost of one step: actions counted and budget units the runner charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub actions: u64,
    pub budget: i64,
}

impl Step {
    /// An ordinary action: one action, one unit of budget.
    pub const fn action() -> Self {
        Self {
            actions: 1,
            budget: 1,
        }
    }

    /// The free crossing into the far region.
    pub const fn free() -> Self {
        Self {
            actions: 1,
            budget: 0,
        }
    }

    /// An action whose sampler already charged the budget through its deltas.
    pub const fn self_charged() -> Self {
        Self {
            actions: 1,
            budget: 0,
        }
    }

    /// `count` ordinary actions applied in one update.
    pub const fn batch(count: u64) -> Self {
        Self {
            actions: count,
            budget: count as i64,
        }
    }
}

/// Per-mode trip logic driven by the trial runner.
pub trait TripMachine {
    /// Mode name for logs and reports.
    fn name(&self) -> &'static str;

    /// Budget a trip starts with.
    fn trip_budget(&self) -> i64;

    /// Re-derive transient flags and pay any entry cost. Called once per
    /// trip, after the budget has been reset.
    fn begin_trip(&mut self, state: &mut ResourceState);

    /// Perform one action.
    fn step(&mut self, state: &mut ResourceState, rng: &mut dyn UniformSource) -> Step;
}

/// Move `street` one unit toward `target`. Returns false when already there.
pub(crate) fn walk_toward(street: &mut i64, target: i64) -> bool {
    if *street < target {
        *street += 1;
        true
    } else if *street > target {
        *street -= 1;
        true
    } else {
        false
    }
}

/// Pay the one-attar entry toll, if there is any attar to pay with.
pub(crate) fn pay_entry_cost(state: &mut ResourceState) {
    if state.attar > 0 {
        state.attar -= 1;
    }
}
