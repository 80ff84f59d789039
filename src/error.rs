//! Top-level error type for the widget shell.

use crate::config::ConfigError;
use crate::machine::Phase;
use thiserror::Error;

/// Errors surfaced to the host.
///
/// The animation engine and the interaction machine never fail; these come
/// from the shell validating form input, parsing configuration and
/// translating event names.
#[derive(Debug, Error)]
pub enum LockError {
    /// Every violation found, not just the first.
    #[error("Invalid configuration: {}", join_violations(.0))]
    InvalidConfig(Vec<ConfigError>),

    #[error("Unknown event '{0}'")]
    UnknownEvent(String),

    #[error("Control '{control}' is disabled while the lock is {phase}")]
    ControlDisabled { control: &'static str, phase: Phase },

    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_violations(violations: &[ConfigError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_lists_every_violation() {
        let err = LockError::InvalidConfig(vec![
            ConfigError::NoTicks,
            ConfigError::DigitOutOfRange {
                position: 2,
                digit: 45,
                ticks_on_dial: 40,
            },
        ]);

        let message = err.to_string();
        assert!(message.starts_with("Invalid configuration: "));
        assert!(message.contains("; "));
        assert!(message.contains("45"));
    }

    #[test]
    fn disabled_control_names_phase() {
        let err = LockError::ControlDisabled {
            control: "ticks_on_dial",
            phase: Phase::Unlocking,
        };
        assert_eq!(
            err.to_string(),
            "Control 'ticks_on_dial' is disabled while the lock is unlocking"
        );
    }
}
