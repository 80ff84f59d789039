//! Mutable simulation state owned by the animation engine.

use crate::engine::segment::RotationSegment;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Smallest radius, as a fraction of the original, reached while zooming
/// out to make room for the lifted shackle.
pub const MIN_RADIUS_FRACTION: f64 = 0.75;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Play every segment, pausing briefly between them.
    #[default]
    Unlock,
    /// Stop after the last segment of each digit until told to continue.
    StepByStep,
    /// Spinning back to zero.
    Reset,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationState {
    /// Dial rotation in radians; accumulates across turns.
    pub current_angle: f64,
    /// Current dial radius in pixels.
    pub radius: f64,
    /// Radius at rest.
    pub original_radius: f64,
    pub mode: Mode,
    pub shackle_open: bool,
    /// Whether draining the queue should lift the shackle. Cleared by reset.
    pub should_open: bool,
    /// Upward displacement of the shackle in pixels.
    pub shackle_lift: f64,
    pub pending: VecDeque<RotationSegment>,
    pub ticks_on_dial: u32,
    pub speed: f64,
}

impl AnimationState {
    pub fn new(ticks_on_dial: u32, speed: f64, radius: f64) -> Self {
        Self {
            current_angle: 0.0,
            radius,
            original_radius: radius,
            mode: Mode::Unlock,
            shackle_open: false,
            should_open: true,
            shackle_lift: 0.0,
            pending: VecDeque::new(),
            ticks_on_dial,
            speed,
        }
    }

    pub fn min_radius(&self) -> f64 {
        self.original_radius * MIN_RADIUS_FRACTION
    }

    /// Whether the dial is drawn at its rest size.
    pub fn at_original_size(&self) -> bool {
        self.radius >= self.original_radius
    }
}
