//! Rotation segments and the dialing sequence of a three-number lock.

use crate::config::Combination;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Which number of the combination a segment dials.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Digit {
    First,
    Second,
    Third,
}

impl Digit {
    /// 1-based position in the combination.
    pub fn index(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }
}

/// One contiguous turn of the dial.
///
/// `total_angle` is signed: positive turns clockwise, negative turns
/// counter-clockwise. `angle_turned` counts up from zero to
/// `|total_angle|` regardless of direction.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct RotationSegment {
    pub total_angle: f64,
    /// `None` for the return-to-zero turn queued by a reset.
    pub digit: Option<Digit>,
    pub angle_turned: f64,
}

impl RotationSegment {
    pub fn new(total_angle: f64, digit: Option<Digit>) -> Self {
        Self {
            total_angle,
            digit,
            angle_turned: 0.0,
        }
    }

    /// Turn for `positions` dial positions while dialing `digit`.
    pub fn dial(positions: i64, ticks_on_dial: u32, digit: Digit) -> Self {
        Self::new(positions_to_radians(positions, ticks_on_dial), Some(digit))
    }

    /// Shortest clockwise turn that brings `current_angle` back to zero.
    ///
    /// A dial already at zero gets a full revolution.
    pub fn return_to_zero(current_angle: f64) -> Self {
        Self::new(TAU - current_angle.rem_euclid(TAU), None)
    }

    pub fn magnitude(&self) -> f64 {
        self.total_angle.abs()
    }

    pub fn angle_left(&self) -> f64 {
        (self.magnitude() - self.angle_turned).max(0.0)
    }

    /// Fraction of the segment already turned, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            1.0
        } else {
            (self.angle_turned / magnitude).min(1.0)
        }
    }

    /// `1.0` for clockwise, `-1.0` for counter-clockwise.
    pub fn direction(&self) -> f64 {
        if self.total_angle < 0.0 {
            -1.0
        } else {
            1.0
        }
    }

    pub fn is_complete(&self) -> bool {
        self.angle_turned >= self.magnitude()
    }

    /// Record `step` radians of travel. A step reaching the end lands on
    /// `|total_angle|` exactly.
    pub fn advance(&mut self, step: f64) {
        if step >= self.angle_left() {
            self.angle_turned = self.magnitude();
        } else {
            self.angle_turned += step;
        }
    }
}

/// Angle covered by `positions` dial positions.
pub fn positions_to_radians(positions: i64, ticks_on_dial: u32) -> f64 {
    positions as f64 * TAU / f64::from(ticks_on_dial)
}

/// The six turns that open a standard three-number lock:
///
/// 1. two full clockwise revolutions,
/// 2. clockwise on to the first number,
/// 3. one full counter-clockwise revolution,
/// 4. counter-clockwise on to the second number,
/// 5. clockwise to the third number.
pub fn unlock_sequence(combination: Combination, ticks_on_dial: u32) -> Vec<RotationSegment> {
    let ticks = i64::from(ticks_on_dial);
    let first = i64::from(combination.first());
    let second = i64::from(combination.second());
    let third = i64::from(combination.third());

    let to_second = if second > first {
        -(second - first)
    } else {
        -(ticks - first + second)
    };
    let to_third = if second > third {
        second - third
    } else {
        second + ticks - third
    };

    vec![
        RotationSegment::dial(ticks, ticks_on_dial, Digit::First),
        RotationSegment::dial(ticks, ticks_on_dial, Digit::First),
        RotationSegment::dial(ticks - first, ticks_on_dial, Digit::First),
        RotationSegment::dial(-ticks, ticks_on_dial, Digit::Second),
        RotationSegment::dial(to_second, ticks_on_dial, Digit::Second),
        RotationSegment::dial(to_third, ticks_on_dial, Digit::Third),
    ]
}
