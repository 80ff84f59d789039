//! Per-frame turn increments.
//!
//! The dial follows a half-sine speed profile: it starts briskly, peaks a
//! little before the middle of a turn and slows towards the end. The profile
//! never reaches zero, so every frame makes progress.

use crate::engine::segment::RotationSegment;
use std::f64::consts::PI;

/// Speed at which one frame covers the nominal `1/90` of a segment.
pub const BASELINE_SPEED: f64 = 50.0;

/// Phase lead so the profile peaks before the midpoint.
const PHASE_LEAD: f64 = PI / 12.0;
/// Lift that keeps `sin(..) + LIFT` positive over the whole turn.
const LIFT: f64 = 0.5;
const FRAME_DIVISOR: f64 = 90.0;
/// Below `1/SNAP_DIVISOR` of the segment left, the frame finishes the turn.
const SNAP_DIVISOR: f64 = 180.0;

/// Unclamped increment for a segment of `magnitude` radians at `progress`.
#[inline]
pub fn eased_increment(progress: f64, magnitude: f64, speed: f64) -> f64 {
    let profile = (progress * PI + PHASE_LEAD).sin() + LIFT;
    (speed / BASELINE_SPEED) * profile * magnitude / FRAME_DIVISOR
}

/// Radians to turn this frame.
///
/// Never exceeds what is left of the segment: the final frame lands exactly
/// on the remaining angle.
pub fn frame_step(segment: &RotationSegment, speed: f64) -> f64 {
    let magnitude = segment.magnitude();
    let left = segment.angle_left();
    let increment = eased_increment(segment.progress(), magnitude, speed);

    if left < magnitude / SNAP_DIVISOR || increment >= left {
        left
    } else {
        increment
    }
}
