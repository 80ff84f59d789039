//! Events accepted by the interaction machine.

use crate::error::LockError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Event sent either by the UI or by the animation engine.
///
/// Wire names match the host-facing dispatch contract (`"UNLOCK"`,
/// `"ROTATION_DONE"`, ...).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockEvent {
    /// Play the whole combination.
    Unlock,
    /// Play the combination one digit at a time.
    StepByStep,
    /// Continue to the next digit.
    NextStep,
    /// Abort and spin the dial home.
    Reset,
    /// The engine finished the rotations for a digit (or all of them).
    RotationDone,
    /// The engine finished lifting the shackle.
    ShackleDone,
    /// The engine finished spinning home.
    ResetDone,
}

impl LockEvent {
    pub const ALL: [LockEvent; 7] = [
        LockEvent::Unlock,
        LockEvent::StepByStep,
        LockEvent::NextStep,
        LockEvent::Reset,
        LockEvent::RotationDone,
        LockEvent::ShackleDone,
        LockEvent::ResetDone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unlock => "UNLOCK",
            Self::StepByStep => "STEP_BY_STEP",
            Self::NextStep => "NEXT_STEP",
            Self::Reset => "RESET",
            Self::RotationDone => "ROTATION_DONE",
            Self::ShackleDone => "SHACKLE_DONE",
            Self::ResetDone => "RESET_DONE",
        }
    }

    /// Whether the event is produced by the animation engine rather than a
    /// user action.
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Self::RotationDone | Self::ShackleDone | Self::ResetDone
        )
    }
}

impl fmt::Display for LockEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LockEvent {
    type Err = LockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| LockError::UnknownEvent(s.to_string()))
    }
}
