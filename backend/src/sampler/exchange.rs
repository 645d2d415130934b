//! Rare-resource exchange.

use super::Sampler;
use crate::models::ResourceState;
use crate::rng::UniformSource;

/// Pennies paid per lot of rare resource.
pub const LOT_PAYOUT: i64 = 1250;

/// Rare units in one lot.
pub const LOT_SIZE: i64 = 3;

/// Converts the rare resource into pennies.
///
/// One draw per call: below `rare_chance` the whole stock is exchanged in
/// bulk at `payout` per (rounded) lot and zeroed; otherwise a single lot is
/// exchanged at the standard rate.
///
/// # Example
/// ```
/// use arbor_trip_core::rng::ScriptedRng;
/// use arbor_trip_core::sampler::{Exchange, Sampler};
/// use arbor_trip_core::ResourceState;
///
/// let exchange = Exchange::new(0.1);
/// let mut state = ResourceState { attar: 14, ..Default::default() };
///
/// exchange.sample(&mut state, &mut ScriptedRng::constant(0.5));
/// assert_eq!((state.attar, state.pennies), (11, 1250));
///
/// exchange.sample(&mut state, &mut ScriptedRng::constant(0.0));
/// assert_eq!((state.attar, state.pennies), (0, 1250 + 4 * 1250));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exchange {
    /// Probability of a bulk exchange, in `[0, 1]`
    pub rare_chance: f64,
    pub payout: i64,
    pub lot_size: i64,
}

impl Exchange {
    pub fn new(rare_chance: f64) -> Self {
        Self {
            rare_chance,
            payout: LOT_PAYOUT,
            lot_size: LOT_SIZE,
        }
    }

    fn bulk_lots(&self, attar: i64) -> i64 {
        (attar as f64 / self.lot_size as f64).round() as i64
    }
}

impl Sampler for Exchange {
    fn sample(&self, state: &mut ResourceState, rng: &mut dyn UniformSource) {
        if rng.next_f64() < self.rare_chance {
            state.pennies += self.bulk_lots(state.attar) * self.payout;
            state.attar = 0;
        } else {
            state.pennies += self.payout;
            state.attar -= self.lot_size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_lots_round_to_nearest() {
        let exchange = Exchange::new(1.0);
        assert_eq!(exchange.bulk_lots(3), 1);
        assert_eq!(exchange.bulk_lots(4), 1);
        assert_eq!(exchange.bulk_lots(5), 2);
        assert_eq!(exchange.bulk_lots(13), 4);
        assert_eq!(exchange.bulk_lots(14), 5);
    }
}
