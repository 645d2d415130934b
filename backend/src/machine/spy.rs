//! Spy mode: a single region where the spy check fires every action.

use super::{Step, TripMachine};
use crate::models::ResourceState;
use crate::orchestrator::Knobs;
use crate::rng::UniformSource;
use crate::sampler::{Bernoulli, Sampler};
use crate::strategy::spy_sampler;
use serde::{Deserialize, Serialize};

/// Spy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpyPlan {
    /// Permission at trip start
    pub trip_budget: i64,
}

impl SpyPlan {
    pub fn standard() -> Self {
        Self { trip_budget: 5 }
    }

    /// Lingering variant: a longer stay per trip.
    pub fn linger() -> Self {
        Self { trip_budget: 7 }
    }
}

impl Default for SpyPlan {
    fn default() -> Self {
        Self::standard()
    }
}

pub struct SpyMachine {
    plan: SpyPlan,
    sampler: Bernoulli,
}

impl SpyMachine {
    pub fn new(plan: SpyPlan, knobs: &Knobs) -> Self {
        Self {
            plan,
            sampler: spy_sampler(knobs),
        }
    }

    pub fn sampler(&self) -> &Bernoulli {
        &self.sampler
    }
}

impl TripMachine for SpyMachine {
    fn name(&self) -> &'static str {
        "spy"
    }

    fn trip_budget(&self) -> i64 {
        self.plan.trip_budget
    }

    fn begin_trip(&mut self, _state: &mut ResourceState) {}

    fn step(&mut self, state: &mut ResourceState, rng: &mut dyn UniformSource) -> Step {
        // Success costs one permission, failure two; both via the deltas.
        self.sampler.sample(state, rng);
        Step::self_charged()
    }
}
