//! Fixed-effect samplers. None of these draw from the generator.

use super::Sampler;
use crate::models::{ResourceField, ResourceState};
use crate::rng::UniformSource;

/// Budget left after a "spend everything" action; the loop's own decrement
/// then closes the trip.
pub const REPLENISH_PERMISSION: i64 = 1;

/// Spend all remaining budget on a guaranteed task: `field` gains
/// `per_unit` for every unit of budget, then budget is replenished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tend {
    pub field: ResourceField,
    pub per_unit: i64,
    pub replenish: i64,
}

impl Tend {
    pub fn new(field: ResourceField, per_unit: i64) -> Self {
        Self {
            field,
            per_unit,
            replenish: REPLENISH_PERMISSION,
        }
    }
}

impl Sampler for Tend {
    fn sample(&self, state: &mut ResourceState, _rng: &mut dyn UniformSource) {
        let gain = state.permission * self.per_unit;
        *state.field_mut(self.field) += gain;
        state.permission = self.replenish;
    }
}

/// Spend all remaining budget for pennies at a fixed multiple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CashOut {
    pub pennies_per_unit: i64,
    pub replenish: i64,
}

impl CashOut {
    pub fn new(pennies_per_unit: i64) -> Self {
        Self {
            pennies_per_unit,
            replenish: REPLENISH_PERMISSION,
        }
    }
}

impl Sampler for CashOut {
    fn sample(&self, state: &mut ResourceState, _rng: &mut dyn UniformSource) {
        state.pennies += state.permission * self.pennies_per_unit;
        state.permission = self.replenish;
    }
}

/// Trade one rare unit plus `energy_cost` energy for a fixed payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitExchange {
    pub payout: i64,
    pub energy_cost: i64,
}

impl Sampler for UnitExchange {
    fn sample(&self, state: &mut ResourceState, _rng: &mut dyn UniformSource) {
        state.attar -= 1;
        state.energy -= self.energy_cost;
        state.pennies += self.payout;
    }
}

/// Guaranteed gain of `amount` in `field` per action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Steady {
    pub field: ResourceField,
    pub amount: i64,
}

impl Steady {
    /// Apply `actions` consecutive samples in one update.
    pub fn sample_batch(&self, state: &mut ResourceState, actions: i64) {
        *state.field_mut(self.field) += self.amount * actions;
    }
}

impl Sampler for Steady {
    fn sample(&self, state: &mut ResourceState, _rng: &mut dyn UniformSource) {
        self.sample_batch(state, 1);
    }
}
