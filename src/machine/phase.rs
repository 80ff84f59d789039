//! Phases of the lock widget and the machine's extended context.

use crate::core::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of combination digits; also the last value `step` can take.
pub const FINAL_STEP: u8 = 3;

/// Child state shared by the two compound phases.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubPhase {
    /// An animation is playing.
    Active,
    /// Waiting for the user.
    Idle,
}

/// Externally observable phase of the widget.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Waiting for a combination; inputs editable.
    #[default]
    Start,
    /// Playing the whole combination without stopping.
    Unlocking,
    /// Spinning the dial back to zero.
    Resetting,
    /// Playing the combination one digit at a time.
    Stepping(SubPhase),
    /// Combination done; the shackle is lifting (`Active`) or open (`Idle`).
    Unshackling(SubPhase),
}

impl State for Phase {
    fn name(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::Unlocking => "unlocking",
            Self::Resetting => "resetting",
            Self::Stepping(SubPhase::Active) => "stepping.active",
            Self::Stepping(SubPhase::Idle) => "stepping.idle",
            Self::Unshackling(SubPhase::Active) => "unshackling.active",
            Self::Unshackling(SubPhase::Idle) => "unshackling.idle",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extended state carried alongside the phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct LockContext {
    /// Digit currently being demonstrated in step-by-step mode, `0` otherwise.
    pub step: u8,
    /// Whether the widget has started an animation that has not settled back
    /// at `start`.
    pub animating: bool,
}

impl LockContext {
    /// Whether another digit follows the current one.
    pub fn has_steps_remaining(&self) -> bool {
        self.step < FINAL_STEP
    }

    /// Step after `NEXT_STEP`, saturating at the final digit.
    pub fn next_step(&self) -> u8 {
        self.step.saturating_add(1).min(FINAL_STEP)
    }
}
