//! Configuration violations.

use thiserror::Error;

/// A single problem with widget configuration or form input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Dial must have at least one tick")]
    NoTicks,

    #[error("Speed must be a positive finite number (got {speed})")]
    InvalidSpeed { speed: f64 },

    #[error("Radius must be a positive finite number (got {radius})")]
    InvalidRadius { radius: f64 },

    /// `position` is 1-based: the first, second or third number.
    #[error("Number {position} of the combination is {digit}, outside 0..{ticks_on_dial}")]
    DigitOutOfRange {
        position: usize,
        digit: u32,
        ticks_on_dial: u32,
    },
}
