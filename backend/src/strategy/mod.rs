//! Strategy Choices
//!
//! Each mode is played with a strategy the caller picks once at setup. The
//! choices are closed enums; building one yields the sampler it fires and the
//! street it fires from.
//!
//! Available choices:
//! - Near region: **Explore** (watchful check for attar) or **Tend** (spend
//!   the trip's remaining budget for attar)
//! - Far region: **Walk**, **Witness**, or **Surrender**
//!
//! Skill checks and their difficulty bases are fixed per choice; only the
//! skill values come from [`Knobs`].

use crate::challenge::challenge;
use crate::models::{ResourceDelta, ResourceField};
use crate::orchestrator::{Knobs, SimulationError};
use crate::sampler::{Bernoulli, Sampler, Tend};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty base of the spy and explore checks.
pub const SHADOWY_BASE: f64 = 75.0;

/// Difficulty base of the walk, surrender and shortcut checks.
pub const STANDARD_BASE: f64 = 100.0;

/// Difficulty base of the witness check (before gear offset).
pub const WITNESS_BASE: f64 = 115.0;

/// A sampler together with the street it fires from.
pub struct Route<S> {
    pub sampler: S,
    pub target_street: i64,
}

/// Strategy in the near region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NearChoice {
    Explore,
    Tend,
}

impl NearChoice {
    pub fn build(self, knobs: &Knobs) -> Route<Box<dyn Sampler>> {
        match self {
            NearChoice::Explore => {
                // Budget is charged by the trip loop, not by the deltas.
                let check = challenge(knobs.watchful, SHADOWY_BASE);
                let sampler = Bernoulli::from_challenge(
                    &check,
                    ResourceField::Watchful,
                    ResourceDelta::new().with(ResourceField::Attar, 2),
                    ResourceDelta::new().with(ResourceField::Attar, -1),
                );
                Route {
                    sampler: Box::new(sampler),
                    target_street: 3,
                }
            }
            NearChoice::Tend => Route {
                sampler: Box::new(Tend::new(ResourceField::Attar, 1)),
                target_street: 5,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NearChoice::Explore => "explore",
            NearChoice::Tend => "tend",
        }
    }
}

impl FromStr for NearChoice {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explore" => Ok(NearChoice::Explore),
            "tend" => Ok(NearChoice::Tend),
            other => Err(SimulationError::UnknownStrategy {
                region: "near",
                choice: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for NearChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategy in the far region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FarChoice {
    Walk,
    Witness,
    Surrender,
}

impl FarChoice {
    pub fn build(self, knobs: &Knobs) -> Route<Bernoulli> {
        let (check, skill, success, failure, target_street) = match self {
            FarChoice::Walk => (
                challenge(knobs.watchful, STANDARD_BASE),
                ResourceField::Watchful,
                ResourceDelta::new().with(ResourceField::Attar, 2),
                ResourceDelta::new().with(ResourceField::Attar, -2),
                3,
            ),
            FarChoice::Witness => (
                challenge(knobs.watchful - knobs.gear_diff, WITNESS_BASE),
                ResourceField::Watchful,
                ResourceDelta::new()
                    .with(ResourceField::Attar, -3)
                    .with(ResourceField::Pennies, 750),
                ResourceDelta::new()
                    .with(ResourceField::Attar, 2)
                    .with(ResourceField::Pennies, -250),
                5,
            ),
            FarChoice::Surrender => (
                challenge(knobs.persuasive, STANDARD_BASE),
                ResourceField::Persuasive,
                ResourceDelta::new()
                    .with(ResourceField::Attar, -3)
                    .with(ResourceField::Pennies, 750)
                    .with(ResourceField::Energy, 3),
                ResourceDelta::new()
                    .with(ResourceField::Attar, 1)
                    .with(ResourceField::Pennies, 250)
                    .with(ResourceField::Energy, 1),
                4,
            ),
        };
        Route {
            sampler: Bernoulli::from_challenge(&check, skill, success, failure),
            target_street,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FarChoice::Walk => "walk",
            FarChoice::Witness => "witness",
            FarChoice::Surrender => "surrender",
        }
    }
}

impl FromStr for FarChoice {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "walk" => Ok(FarChoice::Walk),
            "witness" => Ok(FarChoice::Witness),
            "surrender" => Ok(FarChoice::Surrender),
            other => Err(SimulationError::UnknownStrategy {
                region: "far",
                choice: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for FarChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The spy check: success earns pennies and costs one permission, failure
/// costs two.
pub fn spy_sampler(knobs: &Knobs) -> Bernoulli {
    let check = challenge(knobs.watchful, SHADOWY_BASE);
    Bernoulli::from_challenge(
        &check,
        ResourceField::Watchful,
        ResourceDelta::new()
            .with(ResourceField::Pennies, 500)
            .with(ResourceField::Permission, -1),
        ResourceDelta::new().with(ResourceField::Permission, -2),
    )
}

/// The shortcut home: a dangerous check that only awards change points.
/// Its branch decides how far the street moves.
pub fn shortcut_sampler(knobs: &Knobs) -> Bernoulli {
    let check = challenge(knobs.dangerous, STANDARD_BASE);
    Bernoulli::from_challenge(
        &check,
        ResourceField::Dangerous,
        ResourceDelta::new(),
        ResourceDelta::new(),
    )
}
