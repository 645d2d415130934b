//! Scripted uniform source for deterministic tests and replays.

use super::UniformSource;

/// Replays a fixed cycle of draws.
///
/// `ScriptedRng::constant(0.0)` forces every Bernoulli trial to succeed;
/// `ScriptedRng::constant(ScriptedRng::JUST_BELOW_ONE)` forces every trial to
/// fail.
///
/// # Example
/// ```
/// use arbor_trip_core::rng::{ScriptedRng, UniformSource};
///
/// let mut rng = ScriptedRng::new(vec![0.25, 0.75]);
/// assert_eq!(rng.next_f64(), 0.25);
/// assert_eq!(rng.next_f64(), 0.75);
/// assert_eq!(rng.next_f64(), 0.25);
/// assert_eq!(rng.draws(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
    draws: u64,
}

impl ScriptedRng {
    /// Largest f64 strictly below 1.0.
    pub const JUST_BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

    /// Cycle through `values`; an empty script behaves like `constant(0.0)`.
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() { vec![0.0] } else { values };
        Self {
            values,
            cursor: 0,
            draws: 0,
        }
    }

    /// Return `value` for every draw.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Total draws taken so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl UniformSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        self.draws += 1;
        value
    }
}
