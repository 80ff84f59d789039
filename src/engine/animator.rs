//! Frame-driven animation engine.

use crate::config::{Combination, LockConfig};
use crate::engine::easing::{frame_step, BASELINE_SPEED};
use crate::engine::schedule::FrameRequest;
use crate::engine::segment::{unlock_sequence, RotationSegment};
use crate::engine::shackle::{regrow, Progress, ShackleMotion};
use crate::engine::state::{AnimationState, Mode};
use crate::machine::LockEvent;
use crate::render::Scene;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pause between segments at [`BASELINE_SPEED`].
pub const BASELINE_PAUSE: Duration = Duration::from_secs(1);

/// Animation phase that just finished.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Completion {
    /// The rotations for a digit (step-by-step) or the whole combination.
    Rotation,
    /// The shackle is fully lifted.
    Shackle,
    /// The dial is back at zero.
    Reset,
}

impl From<Completion> for LockEvent {
    fn from(completion: Completion) -> Self {
        match completion {
            Completion::Rotation => LockEvent::RotationDone,
            Completion::Shackle => LockEvent::ShackleDone,
            Completion::Reset => LockEvent::ResetDone,
        }
    }
}

/// What one call to [`AnimationEngine::frame`] produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// The scene changed and should be repainted.
    pub redraw: bool,
    /// Completions, in the order the phases finished.
    pub completions: Vec<Completion>,
}

/// Pause between two segments at `speed`.
pub fn pause_for(speed: f64) -> Duration {
    Duration::try_from_secs_f64(BASELINE_PAUSE.as_secs_f64() * BASELINE_SPEED / speed)
        .unwrap_or(BASELINE_PAUSE)
}

/// Dial and shackle animation for one widget.
///
/// The host calls [`frame`](Self::frame) once per display refresh with a
/// monotonic timestamp. Three loops share that tick: dial rotation, shackle
/// opening, and the zoom back in after a reset. Each loop owns a
/// [`FrameRequest`]; a loop only runs on frames it asked for.
#[derive(Clone, Debug)]
pub struct AnimationEngine {
    state: AnimationState,
    rotation: FrameRequest,
    shackle: FrameRequest,
    regrowth: FrameRequest,
    shackle_motion: Option<ShackleMotion>,
}

impl AnimationEngine {
    pub fn new(ticks_on_dial: u32, speed: f64, radius: f64) -> Self {
        Self {
            state: AnimationState::new(ticks_on_dial, speed, radius),
            rotation: FrameRequest::default(),
            shackle: FrameRequest::default(),
            regrowth: FrameRequest::default(),
            shackle_motion: None,
        }
    }

    pub fn from_config(config: &LockConfig) -> Self {
        Self::new(config.ticks_on_dial, config.speed, config.radius)
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn scene(&self) -> Scene {
        Scene {
            angle: self.state.current_angle,
            radius: self.state.radius,
            ticks_on_dial: self.state.ticks_on_dial,
            shackle_lift: self.state.shackle_lift,
        }
    }

    /// No loop has a frame pending.
    pub fn is_idle(&self) -> bool {
        !(self.rotation.is_pending() || self.shackle.is_pending() || self.regrowth.is_pending())
    }

    /// Whether the shackle sub-animation is in flight.
    pub fn is_opening_shackle(&self) -> bool {
        self.shackle_motion.is_some()
    }

    /// Takes effect on the next frame; the current segment keeps its
    /// progress.
    pub fn set_speed(&mut self, speed: f64) {
        self.state.speed = speed;
    }

    pub fn set_ticks_on_dial(&mut self, ticks_on_dial: u32) {
        self.state.ticks_on_dial = ticks_on_dial;
    }

    /// Queue the turns that open `combination` and start turning.
    ///
    /// Digits must already be validated against `ticks_on_dial`.
    pub fn open_lock(&mut self, combination: Combination, ticks_on_dial: u32, step_by_step: bool) {
        self.state.ticks_on_dial = ticks_on_dial;
        self.state.pending = unlock_sequence(combination, ticks_on_dial).into();
        self.state.mode = if step_by_step {
            Mode::StepByStep
        } else {
            Mode::Unlock
        };
        self.state.should_open = true;
        self.rotation.next_frame();

        tracing::debug!(
            digits = ?combination.digits(),
            ticks_on_dial,
            step_by_step,
            "opening lock"
        );
    }

    /// Resume after a step-by-step pause.
    ///
    /// Does nothing when the queue is empty or the dial is already turning.
    pub fn next_step(&mut self) {
        if self.state.pending.is_empty() {
            tracing::debug!("next step requested with no segments queued");
            return;
        }
        if self.rotation.is_pending() {
            return;
        }
        self.rotation.next_frame();
    }

    /// Abandon the current animation and spin the dial home.
    ///
    /// Idempotent while a reset is running. Queued segments are discarded
    /// without completing. The shackle drops shut at once and the dial grows
    /// back to its rest size alongside the spin.
    pub fn reset(&mut self) {
        if self.state.mode == Mode::Reset {
            return;
        }

        let discarded = self.state.pending.len();
        self.state.should_open = false;
        self.state.mode = Mode::Reset;
        self.state.pending.clear();
        self.state
            .pending
            .push_back(RotationSegment::return_to_zero(self.state.current_angle));
        self.rotation.next_frame();

        if self.shackle_motion.take().is_some() {
            self.shackle.cancel();
        }
        self.state.shackle_lift = 0.0;
        self.state.shackle_open = false;
        if !self.state.at_original_size() {
            self.regrowth.next_frame();
        }

        tracing::debug!(discarded, angle = self.state.current_angle, "resetting");
    }

    /// Advance every loop that is due at `now`.
    ///
    /// Loops scheduled while handling this frame run no earlier than the
    /// next one.
    pub fn frame(&mut self, now: Duration) -> FrameOutcome {
        let rotate = self.rotation.take_due(now);
        let lift = self.shackle.take_due(now);
        let regrow = self.regrowth.take_due(now);

        let mut outcome = FrameOutcome::default();
        if rotate {
            self.advance_rotation(now, &mut outcome);
        }
        if lift {
            self.advance_shackle(&mut outcome);
        }
        if regrow {
            self.advance_regrowth(&mut outcome);
        }
        outcome
    }

    fn advance_rotation(&mut self, now: Duration, outcome: &mut FrameOutcome) {
        let speed = self.state.speed;
        let Some(segment) = self.state.pending.front_mut() else {
            return;
        };

        if !segment.is_complete() {
            let step = frame_step(segment, speed);
            self.state.current_angle += segment.direction() * step;
            segment.advance(step);
            outcome.redraw = true;
        }

        if segment.is_complete() {
            self.finish_segment(now, outcome);
        } else {
            self.rotation.next_frame();
        }
    }

    fn finish_segment(&mut self, now: Duration, outcome: &mut FrameOutcome) {
        let finished = self.state.pending.pop_front().and_then(|s| s.digit);
        tracing::trace!(digit = ?finished, remaining = self.state.pending.len(), "segment done");

        if let Some(next) = self.state.pending.front() {
            if self.state.mode != Mode::StepByStep || next.digit == finished {
                self.rotation.after(now, pause_for(self.state.speed));
            } else {
                tracing::debug!(digit = ?finished, "digit dialed, waiting for next step");
                outcome.completions.push(Completion::Rotation);
            }
            return;
        }

        if self.state.mode == Mode::Reset {
            self.state.mode = Mode::Unlock;
            self.state.current_angle = 0.0;
            tracing::debug!("dial back at zero");
            outcome.completions.push(Completion::Reset);
            return;
        }

        tracing::debug!("combination dialed");
        outcome.completions.push(Completion::Rotation);
        if self.state.should_open && self.shackle_motion.is_none() {
            if self.regrowth.cancel() {
                tracing::trace!(radius = self.state.radius, "regrowth cut short");
            }
            self.shackle_motion = Some(ShackleMotion::default());
            self.shackle.next_frame();
        }
    }

    fn advance_shackle(&mut self, outcome: &mut FrameOutcome) {
        let Some(motion) = self.shackle_motion.as_mut() else {
            return;
        };

        match motion.advance(&mut self.state) {
            Progress::Running => {
                outcome.redraw = true;
                self.shackle.next_frame();
            }
            Progress::Finished => {
                self.shackle_motion = None;
                self.state.shackle_open = true;
                tracing::debug!(radius = self.state.radius, "shackle open");
                outcome.completions.push(Completion::Shackle);
            }
        }
    }

    fn advance_regrowth(&mut self, outcome: &mut FrameOutcome) {
        // The shackle zoom owns the radius once it starts.
        if self.shackle_motion.is_some() {
            return;
        }
        outcome.redraw = true;
        if regrow(&mut self.state) == Progress::Running {
            self.regrowth.next_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    const FRAME: Duration = Duration::from_millis(16);

    fn engine() -> AnimationEngine {
        AnimationEngine::new(40, 50.0, 100.0)
    }

    /// Tick until idle or `max_frames`, collecting completions.
    fn run(engine: &mut AnimationEngine, now: &mut Duration, max_frames: usize) -> Vec<Completion> {
        let mut completions = Vec::new();
        for _ in 0..max_frames {
            if engine.is_idle() {
                break;
            }
            *now += FRAME;
            completions.extend(engine.frame(*now).completions);
        }
        completions
    }

    #[test]
    fn new_engine_is_idle_at_rest() {
        let engine = engine();
        assert!(engine.is_idle());
        assert_eq!(engine.state().current_angle, 0.0);
        assert_eq!(engine.state().radius, 100.0);
        assert!(!engine.state().shackle_open);
    }

    #[test]
    fn open_lock_queues_six_segments() {
        let mut engine = engine();
        engine.open_lock(Combination::new(10, 25, 20), 40, false);

        assert_eq!(engine.state().pending.len(), 6);
        assert_eq!(engine.state().mode, Mode::Unlock);
        assert!(!engine.is_idle());
    }

    #[test]
    fn unlock_runs_to_an_open_shackle() {
        let mut engine = engine();
        let mut now = Duration::ZERO;
        engine.open_lock(Combination::new(10, 25, 20), 40, false);

        let completions = run(&mut engine, &mut now, 100_000);

        assert_eq!(completions, vec![Completion::Rotation, Completion::Shackle]);
        assert!(engine.state().shackle_open);
        assert!(engine.state().pending.is_empty());
        assert!((engine.state().radius - 75.0).abs() < 1e-9);

        // 20 sits under the pointer: -20 positions modulo a full turn.
        let target = (-20.0 * TAU / 40.0).rem_euclid(TAU);
        assert!((engine.state().current_angle.rem_euclid(TAU) - target).abs() < 1e-9);
    }

    #[test]
    fn unlock_pauses_between_segments() {
        let mut engine = engine();
        engine.open_lock(Combination::new(10, 25, 20), 40, false);

        let mut now = Duration::ZERO;
        while engine.state().pending.len() == 6 {
            now += FRAME;
            engine.frame(now);
        }

        assert_eq!(engine.rotation.deadline(), Some(now + BASELINE_PAUSE));
        let angle = engine.state().current_angle;
        let outcome = engine.frame(now + FRAME);
        assert!(!outcome.redraw);
        assert_eq!(engine.state().current_angle, angle);
    }

    #[test]
    fn step_by_step_stops_between_digits() {
        let mut engine = engine();
        let mut now = Duration::ZERO;
        engine.open_lock(Combination::new(10, 25, 20), 40, true);

        assert_eq!(run(&mut engine, &mut now, 100_000), vec![Completion::Rotation]);
        assert_eq!(engine.state().pending.len(), 3);
        assert!(engine.is_idle());

        engine.next_step();
        assert_eq!(run(&mut engine, &mut now, 100_000), vec![Completion::Rotation]);
        assert_eq!(engine.state().pending.len(), 1);

        engine.next_step();
        assert_eq!(
            run(&mut engine, &mut now, 100_000),
            vec![Completion::Rotation, Completion::Shackle]
        );
    }

    #[test]
    fn next_step_without_segments_is_a_no_op() {
        let mut engine = engine();
        engine.next_step();
        assert!(engine.is_idle());
    }

    #[test]
    fn reset_replaces_queue_with_single_return() {
        let mut engine = engine();
        let mut now = Duration::ZERO;
        engine.open_lock(Combination::new(10, 25, 20), 40, true);
        for _ in 0..10 {
            now += FRAME;
            engine.frame(now);
        }

        engine.reset();

        assert_eq!(engine.state().mode, Mode::Reset);
        assert_eq!(engine.state().pending.len(), 1);
        assert_eq!(engine.state().pending[0].digit, None);
        assert_eq!(run(&mut engine, &mut now, 100_000), vec![Completion::Reset]);
        assert_eq!(engine.state().current_angle, 0.0);
        assert_eq!(engine.state().mode, Mode::Unlock);
    }

    #[test]
    fn reset_is_idempotent_while_resetting() {
        let mut once = engine();
        let mut twice = engine();
        let mut now_once = Duration::ZERO;
        let mut now_twice = Duration::ZERO;

        for engine in [&mut once, &mut twice] {
            engine.open_lock(Combination::new(3, 17, 29), 40, false);
        }
        run(&mut once, &mut now_once, 100_000);
        run(&mut twice, &mut now_twice, 100_000);

        once.reset();
        twice.reset();
        twice.frame(now_twice + FRAME);
        twice.reset();
        now_twice += FRAME;

        run(&mut once, &mut now_once, 100_000);
        run(&mut twice, &mut now_twice, 100_000);

        assert_eq!(once.state(), twice.state());
        assert_eq!(once.state().current_angle, 0.0);
        assert_eq!(once.state().radius, 100.0);
        assert!(!once.state().shackle_open);
    }

    #[test]
    fn reset_during_shackle_opening_never_reports_it() {
        let mut engine = engine();
        let mut now = Duration::ZERO;
        engine.open_lock(Combination::new(10, 25, 20), 40, false);

        let mut completions = Vec::new();
        while !engine.is_opening_shackle() || engine.state().radius > 90.0 {
            now += FRAME;
            completions.extend(engine.frame(now).completions);
        }
        assert_eq!(completions, vec![Completion::Rotation]);

        engine.reset();
        assert_eq!(run(&mut engine, &mut now, 100_000), vec![Completion::Reset]);
        assert!(!engine.state().shackle_open);
        assert_eq!(engine.state().radius, 100.0);
        assert_eq!(engine.state().shackle_lift, 0.0);
    }

    #[test]
    fn unlock_right_after_fast_reset_still_opens_shackle() {
        let mut engine = AnimationEngine::new(40, 10_000.0, 100.0);
        let mut now = Duration::ZERO;
        engine.open_lock(Combination::new(10, 25, 20), 40, false);
        run(&mut engine, &mut now, 100_000);
        assert!(engine.state().shackle_open);

        engine.reset();
        assert!(!engine.state().shackle_open);
        let mut completions = Vec::new();
        while !completions.contains(&Completion::Reset) {
            now += FRAME;
            completions.extend(engine.frame(now).completions);
        }
        assert!(engine.state().radius < 100.0, "regrowth should still be running");

        engine.open_lock(Combination::new(10, 25, 20), 40, false);
        assert_eq!(
            run(&mut engine, &mut now, 100_000),
            vec![Completion::Rotation, Completion::Shackle]
        );
        assert!(engine.state().shackle_open);
        assert!((engine.state().radius - 75.0).abs() < 1e-9);
        assert!(engine.is_idle());
    }

    #[test]
    fn speed_change_applies_on_next_frame() {
        let mut engine = engine();
        engine.open_lock(Combination::new(10, 25, 20), 40, false);
        let mut now = Duration::ZERO;
        for _ in 0..5 {
            now += FRAME;
            engine.frame(now);
        }

        let before = engine.state().pending[0];
        let angle_before = engine.state().current_angle;
        engine.set_speed(90.0);
        engine.frame(now + FRAME);
        let after = engine.state().pending[0];

        let expected = frame_step(&before, 90.0);
        assert!((after.angle_turned - (before.angle_turned + expected)).abs() < 1e-12);
        assert!((engine.state().current_angle - angle_before - expected).abs() < 1e-12);
        assert_eq!(after.total_angle, before.total_angle);
    }

    #[test]
    fn faster_speed_shortens_pause() {
        assert_eq!(pause_for(BASELINE_SPEED), BASELINE_PAUSE);
        assert_eq!(pause_for(100.0), Duration::from_millis(500));
        assert!(pause_for(10.0) > pause_for(90.0));
    }

    #[test]
    fn completions_map_to_events() {
        assert_eq!(LockEvent::from(Completion::Rotation), LockEvent::RotationDone);
        assert_eq!(LockEvent::from(Completion::Shackle), LockEvent::ShackleDone);
        assert_eq!(LockEvent::from(Completion::Reset), LockEvent::ResetDone);
    }
}
