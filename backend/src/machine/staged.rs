//! Staged mode: the six-stage loop/grind machine.
//!
//! ```text
//! NEAR: 0 BuildCapacity ─(budget <= reserve)─▶ 1 BuildNear
//!                                                   │ attar >= 5 (free crossing)
//!                                                   ▼
//! FAR:  2 BuildFar ─(attar >= limit)─▶ 3 ConvertFar ─(energy spent)─▶ 4 GiftFar
//!          └──────────────┴─────(budget < recover threshold)───────────┴─▶ 5 RecoverCapacity
//! ```
//!
//! Every iteration checks for a region crossing first, then opens any stage
//! gates, then performs the stage's action. A crossing always drops back to
//! the building stage of the new region.

use super::phase::{
    staged_advance, staged_crossing, staged_trip_start, Phase, Region, Stage, CONVERT_STREET,
    ENTRY_STREET, HOME_STREET,
};
use super::{pay_entry_cost, walk_toward, Step, TripMachine};
use crate::models::{ResourceField, ResourceState};
use crate::orchestrator::Knobs;
use crate::rng::UniformSource;
use crate::sampler::{Bernoulli, CashOut, Exchange, Outcome, Sampler, Steady, UnitExchange};
use crate::strategy::{shortcut_sampler, FarChoice, NearChoice, Route};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Staged machine configuration.
///
/// # Fields
///
/// * `trip_budget` - Permission at trip start
/// * `capacity_reserve` - Stage 0 builds energy while budget stays above this
/// * `fast_forward` - Apply stage 0 as a single batched update
/// * `attar_limit` - Attar stock that opens the conversion stage
/// * `recover_threshold` - Far stages head home once budget drops below this
/// * `unit_payout` - Pennies per attar in the conversion stage
/// * `shortcut_step` - Streets gained by a successful shortcut
/// * `slip_range` - A failed shortcut gains a uniform `0..=slip_range` streets
/// * `cash_out_rate` - Pennies per unit of budget spent at home
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedPlan {
    pub near: NearChoice,
    pub far: FarChoice,
    pub trip_budget: i64,
    pub capacity_reserve: i64,
    #[serde(default)]
    pub fast_forward: bool,
    pub attar_limit: i64,
    pub recover_threshold: i64,
    #[serde(default = "default_unit_payout")]
    pub unit_payout: i64,
    #[serde(default = "default_shortcut_step")]
    pub shortcut_step: i64,
    #[serde(default = "default_slip_range")]
    pub slip_range: i64,
    #[serde(default = "default_cash_out_rate")]
    pub cash_out_rate: i64,
}

fn default_unit_payout() -> i64 {
    450
}

fn default_shortcut_step() -> i64 {
    2
}

fn default_slip_range() -> i64 {
    2
}

fn default_cash_out_rate() -> i64 {
    100
}

impl StagedPlan {
    /// Short trips, capacity built one action at a time.
    pub fn looping() -> Self {
        Self {
            near: NearChoice::Explore,
            far: FarChoice::Witness,
            trip_budget: 6,
            capacity_reserve: 4,
            fast_forward: false,
            attar_limit: 12,
            recover_threshold: 3,
            unit_payout: default_unit_payout(),
            shortcut_step: default_shortcut_step(),
            slip_range: default_slip_range(),
            cash_out_rate: default_cash_out_rate(),
        }
    }

    /// Long trips, capacity fast-forwarded in one batch.
    pub fn grind() -> Self {
        Self {
            trip_budget: 10,
            fast_forward: true,
            ..Self::looping()
        }
    }
}

pub struct StagedMachine {
    plan: StagedPlan,
    near: Route<Box<dyn Sampler>>,
    far: Route<Bernoulli>,
    shortcut: Bernoulli,
    capacity: Steady,
    convert: UnitExchange,
    gift: Exchange,
    cash_out: CashOut,
    phase: Phase,
    street: i64,
}

impl StagedMachine {
    pub fn new(plan: StagedPlan, knobs: &Knobs) -> Self {
        Self {
            plan,
            near: plan.near.build(knobs),
            far: plan.far.build(knobs),
            shortcut: shortcut_sampler(knobs),
            capacity: Steady {
                field: ResourceField::Energy,
                amount: 1,
            },
            convert: UnitExchange {
                payout: plan.unit_payout,
                energy_cost: 1,
            },
            gift: Exchange::new(knobs.rare_probability()),
            cash_out: CashOut::new(plan.cash_out_rate),
            phase: Phase::new(Region::Near, Stage::BuildCapacity),
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

    pub fn plan(&self) -> &StagedPlan {
        &self.plan
    }

    fn build_capacity(&mut self, state: &mut ResourceState, rng: &mut dyn UniformSource) -> Step {
        if self.plan.fast_forward {
            // The gate guarantees at least one action above the reserve.
            let count = state.permission - self.plan.capacity_reserve;
            self.capacity.sample_batch(state, count);
            Step::batch(count as u64)
        } else {
            self.capacity.sample(state, rng);
            Step::action()
        }
    }

    fn recover(&mut self, state: &mut ResourceState, rng: &mut dyn UniformSource) {
        if self.street > HOME_STREET {
            let gained = match self.shortcut.draw(state, rng) {
                Outcome::Success => self.plan.shortcut_step,
                Outcome::Failure => rng.range(0, self.plan.slip_range + 1),
            };
            self.street = (self.street - gained).max(HOME_STREET);
        } else {
            self.cash_out.sample(state, rng);
        }
    }
}

impl TripMachine for StagedMachine {
    fn name(&self) -> &'static str {
        if self.plan.fast_forward {
            "grind"
        } else {
            "loop"
        }
    }

    fn trip_budget(&self) -> i64 {
        self.plan.trip_budget
    }

    fn begin_trip(&mut self, state: &mut ResourceState) {
        self.phase = staged_trip_start(self.phase, state.attar);
        pay_entry_cost(state);
    }

    fn step(&mut self, state: &mut ResourceState, rng: &mut dyn UniformSource) -> Step {
        if let Some(next) = staged_crossing(self.phase, state.attar) {
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

        let advanced = staged_advance(self.phase, state, &self.plan);
        if advanced != self.phase {
            trace!(
                from = self.phase.stage.ordinal(),
                to = advanced.stage.ordinal(),
                "stage advance"
            );
            self.phase = advanced;
        }

        match self.phase.stage {
            Stage::BuildCapacity => return self.build_capacity(state, rng),
            Stage::BuildNear => {
                if !walk_toward(&mut self.street, self.near.target_street) {
                    self.near.sampler.sample(state, rng);
                    state.clamp_attar();
                }
            }
            Stage::BuildFar => {
                if !walk_toward(&mut self.street, self.far.target_street) {
                    self.far.sampler.sample(state, rng);
                }
            }
            Stage::ConvertFar => {
                if !walk_toward(&mut self.street, CONVERT_STREET) {
                    self.convert.sample(state, rng);
                }
            }
            Stage::GiftFar => {
                if !walk_toward(&mut self.street, CONVERT_STREET) {
                    self.gift.sample(state, rng);
                }
            }
            Stage::RecoverCapacity => self.recover(state, rng),
        }
        Step::action()
    }
}
