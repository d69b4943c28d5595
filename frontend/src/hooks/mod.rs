pub mod use_spinner;

pub use use_spinner::*;
