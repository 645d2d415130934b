//! Resource field tags and partial deltas.
//!
//! Samplers describe their effect as a [`ResourceDelta`]: a sparse record
//! over the tracked dimensions where untouched fields stay zero. The
//! challenge function writes skill gains by [`ResourceField`] tag, so field
//! dispatch by value lives here instead of in string keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag for one tracked resource dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceField {
    /// Watchful change points
    Watchful,
    /// Persuasive change points
    Persuasive,
    /// Dangerous change points
    Dangerous,
    /// Currency, in pennies (100 pennies = 1 echo)
    Pennies,
    /// The rare resource (attar)
    Attar,
    /// Per-trip action budget
    Permission,
    /// Secondary consumable (energy)
    Energy,
}

impl ResourceField {
    /// Every taggable field, in record order.
    pub const ALL: [ResourceField; 7] = [
        ResourceField::Watchful,
        ResourceField::Persuasive,
        ResourceField::Dangerous,
        ResourceField::Pennies,
        ResourceField::Attar,
        ResourceField::Permission,
        ResourceField::Energy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResourceField::Watchful => "watchful",
            ResourceField::Persuasive => "persuasive",
            ResourceField::Dangerous => "dangerous",
            ResourceField::Pennies => "pennies",
            ResourceField::Attar => "attar",
            ResourceField::Permission => "permission",
            ResourceField::Energy => "energy",
        }
    }
}

impl fmt::Display for ResourceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sparse additive effect on a [`crate::ResourceState`].
///
/// # Example
/// ```
/// use arbor_trip_core::{ResourceDelta, ResourceField};
///
/// let success = ResourceDelta::new()
///     .with(ResourceField::Attar, -3)
///     .with(ResourceField::Pennies, 750);
/// assert_eq!(success.get(ResourceField::Pennies), 750);
/// assert_eq!(success.get(ResourceField::Energy), 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDelta {
    pub watchful: i64,
    pub persuasive: i64,
    pub dangerous: i64,
    pub pennies: i64,
    pub attar: i64,
    pub permission: i64,
    pub energy: i64,
}

impl ResourceDelta {
    /// Empty delta (no field affected)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter; replaces any previous value for `field`.
    pub fn with(mut self, field: ResourceField, amount: i64) -> Self {
        self.set(field, amount);
        self
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

    pub fn set(&mut self, field: ResourceField, amount: i64) {
        *self.slot_mut(field) = amount;
    }

    fn slot_mut(&mut self, field: ResourceField) -> &mut i64 {
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

    /// True when no field is affected.
    pub fn is_empty(&self) -> bool {
        ResourceField::ALL.iter().all(|&field| self.get(field) == 0)
    }
}
