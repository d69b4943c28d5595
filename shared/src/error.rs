use thiserror::Error;

/// Errors raised by the spinner core. All of them are detected before any
/// timer is scheduled, so the triggering call leaves no partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpinError {
    #[error("a spin needs at least two entries, got {count}")]
    InsufficientEntries { count: usize },
    #[error("cannot resolve a winner over {count} entries")]
    InvalidEntryCount { count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("entries cannot be blank")]
    Blank,
    #[error("entries are limited to {max} characters")]
    TooLong { max: usize },
    #[error("\"{0}\" is already on the wheel")]
    DuplicateEntryRejected(String),
    #[error("the wheel holds at most {max} entries")]
    EntryLimitExceeded { max: usize },
}

/// Failures of courtesy effects (sound, celebration). The lifecycle logs
/// these and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EffectError {
    #[error("effect unavailable: {0}")]
    Unavailable(String),
    #[error("playback failed: {0}")]
    Playback(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("min_spins must be at least 1")]
    MinSpinsZero,
    #[error("min_spins ({min}) is greater than max_spins ({max})")]
    SpinRangeInverted { min: u32, max: u32 },
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
    #[error("max_entries must be within {min}..={max}, got {value}")]
    EntryLimitOutOfRange { value: usize, min: usize, max: usize },
}
