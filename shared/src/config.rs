use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Timing and limit knobs for one wheel. Missing fields fall back to the
/// defaults in [`crate::constants`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    pub spin_duration_ms: u32,
    pub settle_duration_ms: u32,
    pub min_spins: u32,
    pub max_spins: u32,
    pub max_entries: usize,
    pub idle_wobble_degrees: f64,
    pub idle_wobble_period_ms: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: SPIN_DURATION_MS,
            settle_duration_ms: SETTLE_DURATION_MS,
            min_spins: MIN_SPINS,
            max_spins: MAX_SPINS,
            max_entries: MAX_ENTRIES,
            idle_wobble_degrees: IDLE_WOBBLE_DEGREES,
            idle_wobble_period_ms: IDLE_WOBBLE_PERIOD_MS,
        }
    }
}

impl SpinConfig {
    /// Checks the invariants the lifecycle relies on. `min_spins >= 1` is what
    /// keeps cumulative rotation strictly increasing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_spins == 0 {
            return Err(ConfigError::MinSpinsZero);
        }
        if self.min_spins > self.max_spins {
            return Err(ConfigError::SpinRangeInverted {
                min: self.min_spins,
                max: self.max_spins,
            });
        }
        if self.spin_duration_ms == 0 {
            return Err(ConfigError::ZeroDuration("spin_duration_ms"));
        }
        if self.settle_duration_ms == 0 {
            return Err(ConfigError::ZeroDuration("settle_duration_ms"));
        }
        if !(MIN_ENTRIES..=MAX_ENTRIES).contains(&self.max_entries) {
            return Err(ConfigError::EntryLimitOutOfRange {
                value: self.max_entries,
                min: MIN_ENTRIES,
                max: MAX_ENTRIES,
            });
        }
        Ok(())
    }

    pub fn idle_wobble_enabled(&self) -> bool {
        self.idle_wobble_degrees > 0.0 && self.idle_wobble_period_ms > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SpinConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.spin_duration_ms, 5000);
        assert_eq!(config.settle_duration_ms, 1000);
        assert_eq!((config.min_spins, config.max_spins), (6, 12));
    }

    #[test]
    fn rejects_zero_min_spins() {
        let config = SpinConfig { min_spins: 0, ..SpinConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::MinSpinsZero));
    }

    #[test]
    fn rejects_inverted_range() {
        let config = SpinConfig { min_spins: 9, max_spins: 3, ..SpinConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpinRangeInverted { min: 9, max: 3 })
        );
    }

    #[test]
    fn rejects_entry_limit_outside_wheel_bounds() {
        let config = SpinConfig { max_entries: 41, ..SpinConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EntryLimitOutOfRange { value: 41, .. })
        ));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SpinConfig = serde_json::from_str(r#"{"spin_duration_ms": 3000}"#).unwrap();
        assert_eq!(config.spin_duration_ms, 3000);
        assert_eq!(config.settle_duration_ms, SETTLE_DURATION_MS);
        assert_eq!(config.max_entries, MAX_ENTRIES);
    }
}
