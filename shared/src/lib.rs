pub mod config;
pub mod confetti;
pub mod constants;
pub mod entries;
pub mod error;
pub mod history;
pub mod lifecycle;
pub mod selection;
pub mod theme;

pub use config::SpinConfig;
pub use error::{ConfigError, EffectError, EntryError, SpinError};
pub use lifecycle::{SpinLifecycle, SpinOutcome, SpinPhase, WheelFrame};
pub use selection::{SelectionEngine, SpinResult};
