use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SpinConfig;
use crate::constants::{FULL_TURN_DEGREES, MIN_ENTRIES};
use crate::error::{ConfigError, SpinError};

/// Outcome of one completed spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    pub winning_index: usize,
    pub winning_entry: String,
    pub final_rotation_degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Winner {
    pub index: usize,
    pub entry: String,
}

/// Source of randomness for spin targets. Every `rand::Rng` is one; tests and
/// replays use [`FixedDraw`].
pub trait SpinRandom {
    /// Whole turns, uniform in `min..=max`.
    fn full_turns(&mut self, min: u32, max: u32) -> u32;
    /// Extra offset, uniform in `[0, 360)`.
    fn offset_degrees(&mut self) -> f64;
}

impl<R: Rng> SpinRandom for R {
    fn full_turns(&mut self, min: u32, max: u32) -> u32 {
        self.gen_range(min..=max)
    }

    fn offset_degrees(&mut self) -> f64 {
        self.gen_range(0.0..FULL_TURN_DEGREES)
    }
}

/// Always draws the same turns and offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDraw {
    pub turns: u32,
    pub offset_degrees: f64,
}

impl SpinRandom for FixedDraw {
    fn full_turns(&mut self, _min: u32, _max: u32) -> u32 {
        self.turns
    }

    fn offset_degrees(&mut self) -> f64 {
        self.offset_degrees
    }
}

pub struct SelectionEngine<R> {
    random: R,
    min_spins: u32,
    max_spins: u32,
}

impl<R: SpinRandom> SelectionEngine<R> {
    /// At least one whole turn per spin, and `min_spins <= max_spins`.
    pub fn new(random: R, min_spins: u32, max_spins: u32) -> Result<Self, ConfigError> {
        if min_spins == 0 {
            return Err(ConfigError::MinSpinsZero);
        }
        if min_spins > max_spins {
            return Err(ConfigError::SpinRangeInverted {
                min: min_spins,
                max: max_spins,
            });
        }
        Ok(Self {
            random,
            min_spins,
            max_spins,
        })
    }

    pub fn from_config(random: R, config: &SpinConfig) -> Result<Self, ConfigError> {
        Self::new(random, config.min_spins, config.max_spins)
    }

    /// Picks where the next spin stops. The result is always at least one
    /// full turn ahead of `previous_rotation`, whatever the random source
    /// draws, so the wheel never stalls or turns backwards between spins.
    pub fn generate_target_rotation(&mut self, previous_rotation: f64) -> f64 {
        let turns = self
            .random
            .full_turns(self.min_spins, self.max_spins)
            .clamp(self.min_spins, self.max_spins);
        let offset = self.random.offset_degrees();
        previous_rotation + f64::from(turns) * FULL_TURN_DEGREES + offset
    }
}

/// Angle in `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(FULL_TURN_DEGREES);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= FULL_TURN_DEGREES {
        0.0
    } else {
        normalized
    }
}

pub fn slice_size(count: usize) -> f64 {
    FULL_TURN_DEGREES / count as f64
}

/// Clockwise span of slice `index`, measured from the pointer at the top
/// before any rotation is applied.
pub fn slice_span(index: usize, count: usize) -> (f64, f64) {
    let size = slice_size(count);
    (index as f64 * size, (index + 1) as f64 * size)
}

/// Maps a resting rotation to the entry under the pointer.
///
/// The pointer sits at the top and the wheel turns clockwise underneath it,
/// so the slice under the pointer after a rotation of `θ` is the one that
/// started at `-θ`. That mirrors the naive index: `N - 1 - floor(θ / slice)`.
/// Moving the pointer or reversing the rotation means re-deriving this.
pub fn resolve_winner<S: AsRef<str>>(
    final_rotation_degrees: f64,
    entries: &[S],
) -> Result<Winner, SpinError> {
    let count = entries.len();
    if count < MIN_ENTRIES {
        return Err(SpinError::InvalidEntryCount { count });
    }

    let normalized = normalize_degrees(final_rotation_degrees);
    let raw = ((normalized / slice_size(count)).floor() as usize).min(count - 1);
    let index = count - 1 - raw;

    Ok(Winner {
        index,
        entry: entries[index].as_ref().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn abc() -> Vec<String> {
        vec!["A".into(), "B".into(), "C".into()]
    }

    #[test]
    fn resolves_past_a_full_turn() {
        let winner = resolve_winner(370.0, &abc()).unwrap();
        assert_eq!(winner.index, 2);
        assert_eq!(winner.entry, "C");
    }

    #[test]
    fn exact_full_turn_lands_on_last_entry() {
        let winner = resolve_winner(360.0, &["A", "B"]).unwrap();
        assert_eq!(winner.entry, "B");
    }

    #[test]
    fn just_below_full_turn_lands_on_first_entry() {
        let winner = resolve_winner(359.999_999, &["A", "B"]).unwrap();
        assert_eq!(winner.index, 0);
        assert_eq!(winner.entry, "A");
    }

    #[test]
    fn negative_rotation_is_normalized() {
        // -10 degrees rests at 350, the last third of the circle
        let winner = resolve_winner(-10.0, &abc()).unwrap();
        assert_eq!(winner.entry, "A");
    }

    #[test]
    fn rejects_fewer_than_two_entries() {
        assert_eq!(
            resolve_winner(45.0, &["OnlyOne"]),
            Err(SpinError::InvalidEntryCount { count: 1 })
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            resolve_winner(45.0, &empty),
            Err(SpinError::InvalidEntryCount { count: 0 })
        );
    }

    #[test]
    fn fixed_draw_produces_expected_target() {
        let mut engine = SelectionEngine::new(
            FixedDraw { turns: 6, offset_degrees: 45.0 },
            6,
            12,
        )
        .unwrap();
        assert_eq!(engine.generate_target_rotation(0.0), 2205.0);
        assert_eq!(engine.generate_target_rotation(2205.0), 4410.0);
    }

    #[test]
    fn seeded_targets_stay_within_turn_bounds() {
        let mut engine = SelectionEngine::new(StdRng::seed_from_u64(7), 6, 12).unwrap();
        let mut previous = 0.0;
        for _ in 0..500 {
            let target = engine.generate_target_rotation(previous);
            let advance = target - previous;
            assert!(advance >= 6.0 * 360.0);
            assert!(advance < 13.0 * 360.0);
            previous = target;
        }
    }

    #[test]
    fn rejects_turn_ranges_that_could_stall() {
        assert_eq!(
            SelectionEngine::new(StdRng::seed_from_u64(1), 0, 0).err(),
            Some(ConfigError::MinSpinsZero)
        );
        assert_eq!(
            SelectionEngine::new(StdRng::seed_from_u64(1), 9, 2).err(),
            Some(ConfigError::SpinRangeInverted { min: 9, max: 2 })
        );
    }

    #[test]
    fn out_of_range_draws_are_clamped() {
        let mut engine =
            SelectionEngine::new(FixedDraw { turns: 0, offset_degrees: 0.0 }, 1, 3).unwrap();
        assert_eq!(engine.generate_target_rotation(100.0), 460.0);

        let mut engine =
            SelectionEngine::new(FixedDraw { turns: 50, offset_degrees: 10.0 }, 1, 3).unwrap();
        assert_eq!(engine.generate_target_rotation(0.0), 1090.0);
    }

    #[test]
    fn slice_spans_tile_the_circle() {
        assert_eq!(slice_span(0, 4), (0.0, 90.0));
        assert_eq!(slice_span(3, 4), (270.0, 360.0));
    }

    #[test]
    fn normalize_keeps_range() {
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-1e-18), 0.0);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-9);
    }
}
