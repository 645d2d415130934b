//! Resource State
//!
//! Running accumulator for one simulation run.
//!
//! # Critical Invariants
//!
//! 1. **Ownership**: one `ResourceState` belongs to one run; samplers and trip
//!    machines receive it by `&mut`, never capture it
//! 2. **Accumulation**: every field except `permission` accumulates across
//!    trips; `permission` is reset at each trip start and driven to zero
//! 3. **Trip Counter**: `num_trips` is written once per run by the runner,
//!    never per trip

use super::resource::{ResourceDelta, ResourceField};
use serde::{Deserialize, Serialize};

/// Every tracked quantity of a run.
///
/// # Example
///
/// ```rust
/// use arbor_trip_core::{ResourceDelta, ResourceField, ResourceState};
///
/// let mut state = ResourceState::new();
/// state.apply(&ResourceDelta::new().with(ResourceField::Pennies, 500));
/// state.apply(&ResourceDelta::new().with(ResourceField::Pennies, -250));
/// assert_eq!(state.pennies, 250);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Watchful change points gained
    pub watchful: i64,
    /// Persuasive change points gained
    pub persuasive: i64,
    /// Dangerous change points gained
    pub dangerous: i64,
    /// Currency (pennies)
    pub pennies: i64,
    /// Rare resource on hand
    pub attar: i64,
    /// Remaining budget of the current trip
    pub permission: i64,
    /// Secondary consumable
    pub energy: i64,
    /// Completed trips
    pub num_trips: u64,
}

impl ResourceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: ResourceField) -> i64 {
        match field {
            ResourceField::Watchful => self.watchful,
            ResourceField::Persuasive => self.persuasive,
            ResourceField::Dangerous => self.dangerous,
            ResourceField::Pennies => self.pennies,
            ResourceField::Attar => self.attar,
            ResourceField::Permission => self.permission,
            ResourceField::Energy => self.energy,
        }
    }

    /// Mutable handle on one field, for deterministic adjustments.
    pub fn field_mut(&mut self, field: ResourceField) -> &mut i64 {
        match field {
            ResourceField::Watchful => &mut self.watchful,
            ResourceField::Persuasive => &mut self.persuasive,
            ResourceField::Dangerous => &mut self.dangerous,
            ResourceField::Pennies => &mut self.pennies,
            ResourceField::Attar => &mut self.attar,
            ResourceField::Permission => &mut self.permission,
            ResourceField::Energy => &mut self.energy,
        }
    }

    /// Add every field of `delta`. `num_trips` is never touched.
    pub fn apply(&mut self, delta: &ResourceDelta) {
        self.watchful += delta.watchful;
        self.persuasive += delta.persuasive;
        self.dangerous += delta.dangerous;
        self.pennies += delta.pennies;
        self.attar += delta.attar;
        self.permission += delta.permission;
        self.energy += delta.energy;
    }

    /// Clamp the rare resource at zero after an application that may
    /// overdraw it.
    pub fn clamp_attar(&mut self) {
        if self.attar < 0 {
            self.attar = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_leaves_trip_counter_alone() {
        let mut state = ResourceState {
            num_trips: 4,
            ..Default::default()
        };
        state.apply(&ResourceDelta::new().with(ResourceField::Attar, 2));
        assert_eq!(state.num_trips, 4);
        assert_eq!(state.attar, 2);
    }

    #[test]
    fn test_field_mut_matches_get() {
        let mut state = ResourceState::new();
        for (i, field) in ResourceField::ALL.into_iter().enumerate() {
            *state.field_mut(field) = i as i64 * 10;
        }
        for (i, field) in ResourceField::ALL.into_iter().enumerate() {
            assert_eq!(state.get(field), i as i64 * 10);
        }
    }

    #[test]
    fn test_clamp_attar() {
        let mut state = ResourceState {
            attar: -1,
            ..Default::default()
        };
        state.clamp_attar();
        assert_eq!(state.attar, 0);

        state.attar = 3;
        state.clamp_attar();
        assert_eq!(state.attar, 3);
    }
}
