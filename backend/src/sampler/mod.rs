//! Outcome Samplers
//!
//! A sampler is one action's effect on the run's [`ResourceState`]. The
//! trip machines decide *which* sampler fires; the sampler decides *what*
//! changes.
//!
//! # Sampler Interface
//!
//! All samplers implement [`Sampler`]:
//! ```rust
//! use arbor_trip_core::rng::UniformSource;
//! use arbor_trip_core::sampler::Sampler;
//! use arbor_trip_core::ResourceState;
//!
//! struct Loiter;
//!
//! impl Sampler for Loiter {
//!     fn sample(&self, state: &mut ResourceState, _rng: &mut dyn UniformSource) {
//!         state.watchful += 1;
//!     }
//! }
//! ```
//!
//! Available samplers:
//! 1. **Bernoulli**: one draw, success or failure delta
//! 2. **Tend**: remaining budget → proportional gain, budget replenished
//! 3. **CashOut**: remaining budget → fixed multiple in pennies, budget replenished
//! 4. **Exchange**: rare resource → pennies, bulk rate on a rare-chance draw
//! 5. **UnitExchange**: one rare unit plus energy → fixed payout
//! 6. **Steady**: guaranteed fixed gain per action

mod bernoulli;
mod deterministic;
mod exchange;

pub use bernoulli::{Bernoulli, Outcome};
pub use deterministic::{CashOut, Steady, Tend, UnitExchange};
pub use exchange::Exchange;

use crate::models::ResourceState;
use crate::rng::UniformSource;

/// One action's effect on the run state.
pub trait Sampler {
    /// Apply the effect in place.
    fn sample(&self, state: &mut ResourceState, rng: &mut dyn UniformSource);
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    fn sample(&self, state: &mut ResourceState, rng: &mut dyn UniformSource) {
        (**self).sample(state, rng);
    }
}
