//! Random number generation
//!
//! All randomness in the engine flows through [`UniformSource`]. Production
//! runs use the xorshift64* [`RngManager`]; tests inject a [`ScriptedRng`]
//! to pin every draw.
//!
//! CRITICAL: samplers and trip machines never reach for a global generator.

mod scripted;
mod xorshift;

pub use scripted::ScriptedRng;
pub use xorshift::RngManager;

/// A source of uniform draws in `[0.0, 1.0)`.
///
/// The whole engine only ever needs this single primitive; `range` is derived
/// from it unless a generator has a cheaper native form.
pub trait UniformSource {
    /// Next uniform draw in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[min, max)`.
    ///
    /// # Panics
    /// Panics if `min >= max`
    fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");
        let span = (max - min) as f64;
        let offset = (self.next_f64() * span).floor() as i64;
        // Guard against an injected draw at or above 1.0.
        min + offset.min(max - min - 1)
    }
}
