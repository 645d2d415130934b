//! Trip phases and their transition functions.
//!
//! A [`Phase`] is the (region, stage) pair a trip machine is in. Transition
//! functions here take the current phase and a state snapshot and return the
//! next phase; they never touch resources, so the transition table can be
//! tested apart from the per-action effects.

use super::staged::StagedPlan;
use crate::models::ResourceState;
use serde::{Deserialize, Serialize};

/// Street a trip returns to after any region crossing.
pub const ENTRY_STREET: i64 = 3;

/// Street of the far-region exchange.
pub const CONVERT_STREET: i64 = 5;

/// Street the shortcut home leads to.
pub const HOME_STREET: i64 = 1;

/// Rare stock at which the near region gives way to the far one.
pub const FAR_ENTRY_ATTAR: i64 = 5;

/// Rare stock below which the far region washes back to the near one.
pub const NEAR_RETURN_ATTAR: i64 = 3;

/// Highest rare stock at which a trip still starts near.
pub const NEAR_START_MAX_ATTAR: i64 = 5;

/// One of two mutually exclusive locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Near,
    Far,
}

/// Ordinal phases of the staged machine. Gift mode uses the building stages
/// plus `GiftFar` as its converting latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    BuildCapacity = 0,
    BuildNear = 1,
    BuildFar = 2,
    ConvertFar = 3,
    GiftFar = 4,
    RecoverCapacity = 5,
}

impl Stage {
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// The building stage of a region.
    pub fn building(region: Region) -> Self {
        match region {
            Region::Near => Stage::BuildNear,
            Region::Far => Stage::BuildFar,
        }
    }

    /// Region the stage belongs to.
    pub fn region(self) -> Region {
        match self {
            Stage::BuildCapacity | Stage::BuildNear => Region::Near,
            Stage::BuildFar | Stage::ConvertFar | Stage::GiftFar | Stage::RecoverCapacity => {
                Region::Far
            }
        }
    }

    /// Stages that survive a trip boundary in the far region.
    fn is_conversion(self) -> bool {
        matches!(self, Stage::ConvertFar | Stage::GiftFar)
    }
}

/// Where a trip machine is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phase {
    pub region: Region,
    pub stage: Stage,
}

impl Phase {
    pub fn new(region: Region, stage: Stage) -> Self {
        Self { region, stage }
    }

    /// Building in the given region.
    pub fn building(region: Region) -> Self {
        Self::new(region, Stage::building(region))
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::building(Region::Near)
    }
}

/// Region a trip starts in, judged before the entry cost is paid.
pub fn starting_region(attar: i64) -> Region {
    if attar <= NEAR_START_MAX_ATTAR {
        Region::Near
    } else {
        Region::Far
    }
}

/// Region change due at the given rare stock, if any.
pub fn due_crossing(region: Region, attar: i64) -> Option<Region> {
    match region {
        Region::Near if attar >= FAR_ENTRY_ATTAR => Some(Region::Far),
        Region::Far if attar < NEAR_RETURN_ATTAR => Some(Region::Near),
        _ => None,
    }
}

// ============================================================================
// Gift Mode Transitions
// ============================================================================

/// Phase at the start of a gift trip. The converting latch carries over.
pub fn gift_trip_start(phase: Phase, attar: i64) -> Phase {
    let region = starting_region(attar);
    if phase.stage == Stage::GiftFar {
        Phase::new(region, Stage::GiftFar)
    } else {
        Phase::building(region)
    }
}

/// Region crossing for gift mode. The converting latch survives it.
pub fn gift_crossing(phase: Phase, attar: i64) -> Option<Phase> {
    due_crossing(phase.region, attar).map(|region| {
        if phase.stage == Stage::GiftFar {
            Phase::new(region, Stage::GiftFar)
        } else {
            Phase::building(region)
        }
    })
}

// ============================================================================
// Staged Mode Transitions
// ============================================================================

/// Phase at the start of a staged trip: near trips rebuild capacity first,
/// far trips resume a conversion in progress.
pub fn staged_trip_start(phase: Phase, attar: i64) -> Phase {
    match starting_region(attar) {
        Region::Near => Phase::new(Region::Near, Stage::BuildCapacity),
        Region::Far if phase.region == Region::Far && phase.stage.is_conversion() => phase,
        Region::Far => Phase::building(Region::Far),
    }
}

/// Region crossing for the staged machine. Crossing always invalidates the
/// current stage.
pub fn staged_crossing(phase: Phase, attar: i64) -> Option<Phase> {
    due_crossing(phase.region, attar).map(Phase::building)
}

/// One threshold-gated stage advance, or `None` when no gate is open.
fn staged_gate(phase: Phase, state: &ResourceState, plan: &StagedPlan) -> Option<Stage> {
    let next = match phase.stage {
        Stage::BuildCapacity if state.permission <= plan.capacity_reserve => Stage::BuildNear,
        Stage::BuildFar | Stage::ConvertFar | Stage::GiftFar
            if state.permission < plan.recover_threshold =>
        {
            Stage::RecoverCapacity
        }
        Stage::BuildFar if state.attar >= plan.attar_limit => Stage::ConvertFar,
        Stage::ConvertFar if state.energy <= 0 => Stage::GiftFar,
        _ => return None,
    };
    Some(next)
}

/// Advance through every open gate. Stages only move forward, so this
/// settles in at most five hops.
pub fn staged_advance(phase: Phase, state: &ResourceState, plan: &StagedPlan) -> Phase {
    let mut current = phase;
    while let Some(stage) = staged_gate(current, state, plan) {
        current = Phase::new(stage.region(), stage);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(attar: i64, permission: i64, energy: i64) -> ResourceState {
        ResourceState {
            attar,
            permission,
            energy,
            ..Default::default()
        }
    }

    #[test]
    fn test_starting_region_boundary() {
        assert_eq!(starting_region(5), Region::Near);
        assert_eq!(starting_region(6), Region::Far);
    }

    #[test]
    fn test_due_crossing_thresholds() {
        assert_eq!(due_crossing(Region::Near, 4), None);
        assert_eq!(due_crossing(Region::Near, 5), Some(Region::Far));
        assert_eq!(due_crossing(Region::Far, 3), None);
        assert_eq!(due_crossing(Region::Far, 2), Some(Region::Near));
    }

    #[test]
    fn test_gift_latch_survives_crossing_and_trip_start() {
        let latched = Phase::new(Region::Near, Stage::GiftFar);
        assert_eq!(
            gift_crossing(latched, 5),
            Some(Phase::new(Region::Far, Stage::GiftFar))
        );
        assert_eq!(
            gift_trip_start(latched, 9),
            Phase::new(Region::Far, Stage::GiftFar)
        );
        assert_eq!(
            gift_trip_start(Phase::building(Region::Far), 2),
            Phase::building(Region::Near)
        );
    }

    #[test]
    fn test_staged_crossing_resets_stage() {
        let converting = Phase::new(Region::Far, Stage::ConvertFar);
        assert_eq!(
            staged_crossing(converting, 1),
            Some(Phase::building(Region::Near))
        );
        let capacity = Phase::new(Region::Near, Stage::BuildCapacity);
        assert_eq!(
            staged_crossing(capacity, 7),
            Some(Phase::building(Region::Far))
        );
    }

    #[test]
    fn test_staged_trip_start() {
        let gifting = Phase::new(Region::Far, Stage::GiftFar);
        assert_eq!(staged_trip_start(gifting, 8), gifting);
        let recovering = Phase::new(Region::Far, Stage::RecoverCapacity);
        assert_eq!(
            staged_trip_start(recovering, 8),
            Phase::building(Region::Far)
        );
        assert_eq!(
            staged_trip_start(gifting, 4),
            Phase::new(Region::Near, Stage::BuildCapacity)
        );
    }

    #[test]
    fn test_staged_advance_chains_gates() {
        let plan = StagedPlan::grind();
        // Enough attar to convert, no energy to spend → straight to gifting.
        let phase = staged_advance(
            Phase::building(Region::Far),
            &state(plan.attar_limit, 6, 0),
            &plan,
        );
        assert_eq!(phase, Phase::new(Region::Far, Stage::GiftFar));
    }

    #[test]
    fn test_staged_advance_recovers_when_budget_low() {
        let plan = StagedPlan::grind();
        let phase = staged_advance(
            Phase::new(Region::Far, Stage::ConvertFar),
            &state(20, plan.recover_threshold - 1, 4),
            &plan,
        );
        assert_eq!(phase.stage, Stage::RecoverCapacity);
    }

    #[test]
    fn test_capacity_gate() {
        let plan = StagedPlan::grind();
        let phase = Phase::new(Region::Near, Stage::BuildCapacity);
        assert_eq!(
            staged_advance(phase, &state(0, plan.capacity_reserve + 1, 0), &plan),
            phase
        );
        assert_eq!(
            staged_advance(phase, &state(0, plan.capacity_reserve, 0), &plan).stage,
            Stage::BuildNear
        );
    }
}
