//! Challenge - skill checks as success probabilities
//!
//! Converts a skill value and a difficulty base into a success probability
//! plus the change points awarded on success or failure.
//!
//! # Algorithm
//!
//! ```text
//! p    = max(skill, 0) * 0.6 / base
//! tier = min(10, ceil(floor(100 * p) / 10))
//! success cp = REWARD_TABLE[tier]
//! failure cp = PENALTY_TABLE[tier]
//! ```
//!
//! # Critical Invariants
//!
//! 1. Only the skill is clamped; `p` may exceed 1.0, in which case every draw
//!    succeeds
//! 2. Change points are quantized into 11 tiers: `floor` before the `/ 10`,
//!    `ceil` after
//! 3. `base` must be non-zero (caller contract)

use crate::models::{ResourceDelta, ResourceField};

/// Change points on success, indexed by tier.
pub const REWARD_TABLE: [i64; 11] = [6, 6, 5, 5, 4, 3, 3, 2, 2, 2, 1];

/// Change points on failure, indexed by tier.
pub const PENALTY_TABLE: [i64; 11] = [4, 4, 3, 3, 2, 1, 1, 1, 1, 1, 1];

/// Result of evaluating a skill check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Challenge {
    /// Success probability; not clamped above 1.0
    pub probability: f64,
    /// Reward tier, 0..=10
    pub tier: usize,
    /// Change points gained on success
    pub reward: i64,
    /// Change points gained on failure
    pub penalty: i64,
}

impl Challenge {
    /// Write the change points into a success/failure delta pair.
    ///
    /// Both deltas gain points in `field`; everything else they carry is
    /// left as supplied.
    pub fn award(
        &self,
        field: ResourceField,
        mut success: ResourceDelta,
        mut failure: ResourceDelta,
    ) -> (ResourceDelta, ResourceDelta) {
        success.set(field, self.reward);
        failure.set(field, self.penalty);
        (success, failure)
    }
}

/// Evaluate a skill check.
///
/// # Example
/// ```
/// use arbor_trip_core::challenge::challenge;
///
/// let check = challenge(75.0, 75.0);
/// assert_eq!(check.probability, 0.6);
/// assert_eq!(check.tier, 6);
/// assert_eq!((check.reward, check.penalty), (3, 1));
/// ```
pub fn challenge(skill: f64, base: f64) -> Challenge {
    let probability = skill.max(0.0) * 0.6 / base;
    let tier = tier_for(probability);
    Challenge {
        probability,
        tier,
        reward: REWARD_TABLE[tier],
        penalty: PENALTY_TABLE[tier],
    }
}

fn tier_for(probability: f64) -> usize {
    let tier = ((100.0 * probability).floor() / 10.0).ceil();
    // NaN (zero skill over zero base) lands in tier 0.
    if tier.is_nan() || tier <= 0.0 {
        0
    } else {
        (tier as usize).min(10)
    }
}
