// Wheel timing. The spin duration drives both the completion timer and the
// animation curve, so it lives in exactly one place.
pub const SPIN_DURATION_MS: u32 = 5000;
pub const SETTLE_DURATION_MS: u32 = 1000;

// Whole turns drawn for every spin, inclusive on both ends.
pub const MIN_SPINS: u32 = 6;
pub const MAX_SPINS: u32 = 12;

pub const MIN_ENTRIES: usize = 2;
pub const MAX_ENTRIES: usize = 40;
pub const MAX_ENTRY_CHARS: usize = 40;

// Cosmetic sway while the wheel waits for its first spin.
pub const IDLE_WOBBLE_DEGREES: f64 = 1.5;
pub const IDLE_WOBBLE_PERIOD_MS: f64 = 2400.0;

pub const HISTORY_LEN: usize = 10;
pub const CONFETTI_PARTICLES: usize = 140;

pub const FULL_TURN_DEGREES: f64 = 360.0;

pub const INSUFFICIENT_ENTRIES_NOTICE: &str = "Add at least two entries before spinning";
pub const DUPLICATE_ENTRY_NOTICE: &str = "That entry is already on the wheel";
pub const ENTRY_LIMIT_NOTICE: &str = "The wheel is full";
