//! Shackle opening and the matching zoom back in after a reset.
//!
//! Opening runs in two phases. The lock first zooms out until the dial is at
//! three quarters of its size, then the shackle rises until it is lifted by
//! 80% of the radius. Regrowth undoes the zoom one step per frame.

use crate::engine::state::AnimationState;
use serde::{Deserialize, Serialize};

/// Radius change per frame, as a fraction of the original radius.
pub const ZOOM_STEP_FRACTION: f64 = 0.01;
/// Shackle rise per frame, as a fraction of the current radius.
pub const LIFT_STEP_FRACTION: f64 = 0.03;
/// Shackle height when fully open, as a fraction of the current radius.
pub const LIFT_LIMIT_FRACTION: f64 = 0.8;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ShacklePhase {
    ZoomOut,
    Lift,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Progress {
    Running,
    Finished,
}

/// In-flight shackle opening.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ShackleMotion {
    phase: ShacklePhase,
}

impl Default for ShackleMotion {
    fn default() -> Self {
        Self {
            phase: ShacklePhase::ZoomOut,
        }
    }
}

impl ShackleMotion {
    pub fn phase(&self) -> ShacklePhase {
        self.phase
    }

    /// Advance one frame.
    pub fn advance(&mut self, state: &mut AnimationState) -> Progress {
        if self.phase == ShacklePhase::ZoomOut {
            let min = state.min_radius();
            if state.radius > min {
                let step = ZOOM_STEP_FRACTION * state.original_radius;
                state.radius = (state.radius - step).max(min);
                return Progress::Running;
            }
            self.phase = ShacklePhase::Lift;
        }

        let limit = LIFT_LIMIT_FRACTION * state.radius;
        if state.shackle_lift < limit {
            let step = LIFT_STEP_FRACTION * state.radius;
            state.shackle_lift = (state.shackle_lift + step).min(limit);
            Progress::Running
        } else {
            Progress::Finished
        }
    }
}

/// Grow the dial one step back towards its rest size.
///
/// Finishes on the frame that reaches the original radius.
pub fn regrow(state: &mut AnimationState) -> Progress {
    let step = ZOOM_STEP_FRACTION * state.original_radius;
    state.radius = (state.radius + step).min(state.original_radius);
    if state.at_original_size() {
        Progress::Finished
    } else {
        Progress::Running
    }
}
