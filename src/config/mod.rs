//! Widget configuration and form-input validation.
//!
//! Validation accumulates every violation instead of stopping at the first,
//! so a host can flag all bad inputs at once.
//!
//! # Example
//!
//! ```rust
//! use combolock::config::LockConfig;
//!
//! let config = LockConfig::from_toml_str(
//!     r#"
//!     ticks_on_dial = 60
//!     speed = 70.0
//!     combination = [12, 48, 3]
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.ticks_on_dial, 60);
//! assert_eq!(config.combination.digits(), [12, 48, 3]);
//! assert_eq!(config.radius, 100.0);
//! ```

pub mod error;

pub use error::ConfigError;

use crate::error::LockError;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub const DEFAULT_TICKS_ON_DIAL: u32 = 40;
pub const DEFAULT_SPEED: f64 = 50.0;
pub const DEFAULT_RADIUS: f64 = 100.0;
pub const DEFAULT_COMBINATION: [u32; 3] = [10, 25, 20];

/// Outcome of a validation check.
pub type Checked = Validation<(), NonEmptyVec<ConfigError>>;

/// The three numbers of a combination, in dialing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Combination {
    digits: [u32; 3],
}

impl Combination {
    pub const fn new(first: u32, second: u32, third: u32) -> Self {
        Self {
            digits: [first, second, third],
        }
    }

    pub fn first(&self) -> u32 {
        self.digits[0]
    }

    pub fn second(&self) -> u32 {
        self.digits[1]
    }

    pub fn third(&self) -> u32 {
        self.digits[2]
    }

    pub fn digits(&self) -> [u32; 3] {
        self.digits
    }

    /// Check that every number sits on a dial with `ticks_on_dial` positions.
    pub fn validate(&self, ticks_on_dial: u32) -> Checked {
        let checks: Vec<Checked> = self
            .digits
            .iter()
            .enumerate()
            .map(|(i, &digit)| {
                check(digit < ticks_on_dial, || ConfigError::DigitOutOfRange {
                    position: i + 1,
                    digit,
                    ticks_on_dial,
                })
            })
            .collect();
        Validation::all_vec(checks).map(|_| ())
    }
}

impl From<[u32; 3]> for Combination {
    fn from(digits: [u32; 3]) -> Self {
        Self { digits }
    }
}

impl Default for Combination {
    fn default() -> Self {
        DEFAULT_COMBINATION.into()
    }
}

/// Initial widget settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Numbered positions on the dial.
    pub ticks_on_dial: u32,
    /// Relative turn rate; 50 is the baseline.
    pub speed: f64,
    pub combination: Combination,
    /// Dial radius in pixels at rest.
    pub radius: f64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            ticks_on_dial: DEFAULT_TICKS_ON_DIAL,
            speed: DEFAULT_SPEED,
            combination: Combination::default(),
            radius: DEFAULT_RADIUS,
        }
    }
}

impl LockConfig {
    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, LockError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every field, reporting all violations together.
    pub fn validate(&self) -> Result<(), LockError> {
        let checks = vec![
            validate_ticks(self.ticks_on_dial),
            validate_speed(self.speed),
            validate_radius(self.radius),
            self.combination.validate(self.ticks_on_dial),
        ];
        into_result(Validation::all_vec(checks).map(|_| ()))
    }
}

pub fn validate_ticks(ticks_on_dial: u32) -> Checked {
    check(ticks_on_dial > 0, || ConfigError::NoTicks)
}

pub fn validate_speed(speed: f64) -> Checked {
    check(speed.is_finite() && speed > 0.0, || ConfigError::InvalidSpeed {
        speed,
    })
}

pub fn validate_radius(radius: f64) -> Checked {
    check(radius.is_finite() && radius > 0.0, || {
        ConfigError::InvalidRadius { radius }
    })
}

/// Convert an accumulated validation into the shell's error type.
pub fn into_result(checked: Checked) -> Result<(), LockError> {
    match checked {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(LockError::InvalidConfig(
            errors.iter().cloned().collect(),
        )),
    }
}

fn check(ok: bool, violation: impl FnOnce() -> ConfigError) -> Checked {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}
