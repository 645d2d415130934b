//! Binary (success/failure) sampler.

use super::Sampler;
use crate::challenge::Challenge;
use crate::models::{ResourceDelta, ResourceField, ResourceState};
use crate::rng::UniformSource;

/// Which branch a draw took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Applies `success` with the given probability, otherwise `failure`.
///
/// Exactly one draw per call.
///
/// # Example
/// ```
/// use arbor_trip_core::rng::ScriptedRng;
/// use arbor_trip_core::sampler::{Bernoulli, Outcome};
/// use arbor_trip_core::{ResourceDelta, ResourceField, ResourceState};
///
/// let sampler = Bernoulli::new(
///     0.5,
///     ResourceDelta::new().with(ResourceField::Attar, 2),
///     ResourceDelta::new().with(ResourceField::Attar, -1),
/// );
/// let mut state = ResourceState::new();
/// let mut rng = ScriptedRng::new(vec![0.1, 0.9]);
///
/// assert_eq!(sampler.draw(&mut state, &mut rng), Outcome::Success);
/// assert_eq!(sampler.draw(&mut state, &mut rng), Outcome::Failure);
/// assert_eq!(state.attar, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Bernoulli {
    probability: f64,
    success: ResourceDelta,
    failure: ResourceDelta,
}

impl Bernoulli {
    pub fn new(probability: f64, success: ResourceDelta, failure: ResourceDelta) -> Self {
        Self {
            probability,
            success,
            failure,
        }
    }

    /// Build from a skill check: the check's change points land in `skill`
    /// on top of the supplied deltas.
    pub fn from_challenge(
        check: &Challenge,
        skill: ResourceField,
        success: ResourceDelta,
        failure: ResourceDelta,
    ) -> Self {
        let (success, failure) = check.award(skill, success, failure);
        Self::new(check.probability, success, failure)
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn success(&self) -> &ResourceDelta {
        &self.success
    }

    pub fn failure(&self) -> &ResourceDelta {
        &self.failure
    }

    /// Sample and report the branch taken.
    pub fn draw(&self, state: &mut ResourceState, rng: &mut dyn UniformSource) -> Outcome {
        if rng.next_f64() < self.probability {
            state.apply(&self.success);
            Outcome::Success
        } else {
            state.apply(&self.failure);
            Outcome::Failure
        }
    }
}

impl Sampler for Bernoulli {
    fn sample(&self, state: &mut ResourceState, rng: &mut dyn UniformSource) {
        self.draw(state, rng);
    }
}
