//! Gift mode: build attar in two regions, then gift it away for pennies.
//!
//! ```text
//!            attar >= 5 (free)
//!   NEAR ───────────────────────▶ FAR ── attar >= limit ──▶ converting
//!    ▲                             │                           │
//!    └──────── attar < 3 ──────────┘◀────── attar < 3 ─────────┘
//! ```
//!
//! The street and the converting latch carry over between trips; only the
//! region is re-derived when a trip starts.

use super::phase::{
    gift_crossing, gift_trip_start, Phase, Region, Stage, CONVERT_STREET, ENTRY_STREET,
    NEAR_RETURN_ATTAR,
};
use super::{pay_entry_cost, walk_toward, Step, TripMachine};
use crate::models::ResourceState;
use crate::orchestrator::Knobs;
use crate::rng::UniformSource;
use crate::sampler::{Bernoulli, Exchange, Sampler};
use crate::strategy::{FarChoice, NearChoice, Route};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Permission at the start of every gift trip.
pub const GIFT_TRIP_BUDGET: i64 = 5;

/// Gift configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftPlan {
    pub near: NearChoice,
    pub far: FarChoice,
    /// Attar stock that latches converting
    pub attar_limit: i64,
}

impl Default for GiftPlan {
    fn default() -> Self {
        Self {
            near: NearChoice::Explore,
            far: FarChoice::Walk,
            attar_limit: 15,
        }
    }
}

pub struct GiftMachine {
    plan: GiftPlan,
    near: Route<Box<dyn Sampler>>,
    far: Route<Bernoulli>,
    exchange: Exchange,
    phase: Phase,
    street: i64,
}

impl GiftMachine {
    pub fn new(plan: GiftPlan, knobs: &Knobs) -> Self {
        Self {
            plan,
            near: plan.near.build(knobs),
            far: plan.far.build(knobs),
            exchange: Exchange::new(knobs.rare_probability()),
            phase: Phase::default(),
            street: ENTRY_STREET,
        }
    }

    /// Place the machine at an explicit phase and street.
    pub fn with_position(mut self, phase: Phase, street: i64) -> Self {
        self.phase = phase;
        self.street = street;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn street(&self) -> i64 {
        self.street
    }

    pub fn is_converting(&self) -> bool {
        self.phase.stage == Stage::GiftFar
    }

    fn step_near(&mut self, state: &mut ResourceState, rng: &mut dyn UniformSource) {
        if !walk_toward(&mut self.street, self.near.target_street) {
            self.near.sampler.sample(state, rng);
            state.clamp_attar();
        }
    }

    fn step_far(&mut self, state: &mut ResourceState, rng: &mut dyn UniformSource) {
        if self.is_converting() {
            if !walk_toward(&mut self.street, CONVERT_STREET) {
                self.exchange.sample(state, rng);
                if state.attar < NEAR_RETURN_ATTAR {
                    trace!(attar = state.attar, "converting finished");
                    self.phase.stage = Stage::BuildFar;
                }
            }
        } else if !walk_toward(&mut self.street, self.far.target_street) {
            self.far.sampler.sample(state, rng);
            if state.attar >= self.plan.attar_limit {
                trace!(attar = state.attar, "converting latched");
                self.phase.stage = Stage::GiftFar;
            }
        }
    }
}

impl TripMachine for GiftMachine {
    fn name(&self) -> &'static str {
        "gift"
    }

    fn trip_budget(&self) -> i64 {
        GIFT_TRIP_BUDGET
    }

    fn begin_trip(&mut self, state: &mut ResourceState) {
        self.phase = gift_trip_start(self.phase, state.attar);
        pay_entry_cost(state);
    }

    fn step(&mut self, state: &mut ResourceState, rng: &mut dyn UniformSource) -> Step {
        if let Some(next) = gift_crossing(self.phase, state.attar) {
            trace!(
                from = ?self.phase.region,
                to = ?next.region,
                attar = state.attar,
                "region crossing"
            );
            self.phase = next;
            self.street = ENTRY_STREET;
            return match next.region {
                Region::Far => Step::free(),
                Region::Near => Step::action(),
            };
        }

        match self.phase.region {
            Region::Near => self.step_near(state, rng),
            Region::Far => self.step_far(state, rng),
        }
        Step::action()
    }
}
