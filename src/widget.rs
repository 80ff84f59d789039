//! The widget shell: form inputs, buttons, and the frame loop.
//!
//! `LockWidget` owns one [`InteractionMachine`] and one [`AnimationEngine`].
//! User actions become [`LockEvent`]s, fired transitions hand back
//! [`Command`]s that run against the engine, and engine completions are fed
//! back to the machine from [`LockWidget::frame`].

use crate::config::{self, Combination, LockConfig};
use crate::core::State;
use crate::engine::{AnimationEngine, AnimationState, FrameOutcome};
use crate::error::LockError;
use crate::machine::{
    Command, Dispatch, InteractionMachine, LockContext, LockEvent, Phase, PhaseHistory, SubPhase,
    STEPS_REMAINING,
};
use crate::render::{Renderer, Scene};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a button is presented.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    Hidden,
    Disabled,
    Enabled,
}

impl ButtonState {
    pub fn is_visible(self) -> bool {
        self != Self::Hidden
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }

    fn enabled_unless(disabled: bool) -> Self {
        if disabled {
            Self::Disabled
        } else {
            Self::Enabled
        }
    }
}

/// Which controls a host should show and accept input from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Controls {
    pub unlock: ButtonState,
    pub step_by_step: ButtonState,
    pub next_step: ButtonState,
    pub reset: ButtonState,
    /// The three combination inputs.
    pub combination: bool,
    pub ticks_on_dial: bool,
    pub speed: bool,
}

impl Controls {
    /// Control layout for `phase` with the step counter at `step`.
    pub fn for_phase(phase: Phase, step: u8) -> Self {
        let editable = phase == Phase::Start;
        let mut controls = Self {
            unlock: ButtonState::Hidden,
            step_by_step: ButtonState::Hidden,
            next_step: ButtonState::Hidden,
            reset: ButtonState::Hidden,
            combination: editable,
            ticks_on_dial: editable,
            speed: true,
        };

        match phase {
            Phase::Start => {
                controls.unlock = ButtonState::Enabled;
                controls.step_by_step = ButtonState::Enabled;
            }
            Phase::Stepping(sub) => {
                controls.reset = ButtonState::Enabled;
                let context = LockContext {
                    step,
                    animating: true,
                };
                if STEPS_REMAINING.check(&context) {
                    controls.next_step = ButtonState::enabled_unless(sub == SubPhase::Active);
                }
            }
            Phase::Unlocking | Phase::Resetting | Phase::Unshackling(_) => {
                controls.reset = ButtonState::enabled_unless(
                    phase.matches("resetting") || phase.matches("unshackling.active"),
                );
            }
        }

        controls
    }
}

/// What the host renders around the dial.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct View {
    pub phase: Phase,
    pub step: u8,
    pub controls: Controls,
}

/// Point-in-time dump of the whole widget, for host debugging.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub taken_at: DateTime<Utc>,
    pub phase: Phase,
    pub context: LockContext,
    pub config: LockConfig,
    pub animation: AnimationState,
    pub history: PhaseHistory,
    /// Wall-clock span of the retained history.
    pub history_span: Option<Duration>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, LockError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// An animated combination lock.
///
/// # Example
///
/// ```rust
/// use combolock::{LockConfig, LockWidget, NoopRenderer, Phase, State};
/// use std::time::Duration;
///
/// let mut widget = LockWidget::new(LockConfig::default()).unwrap();
/// widget.unlock().unwrap();
/// assert_eq!(widget.view().phase, Phase::Unlocking);
///
/// let mut now = Duration::ZERO;
/// while !widget.is_idle() {
///     now += Duration::from_millis(16);
///     widget.frame(now, &mut NoopRenderer);
/// }
/// assert!(widget.view().phase.matches("unshackling.idle"));
/// ```
#[derive(Clone, Debug)]
pub struct LockWidget {
    config: LockConfig,
    machine: InteractionMachine,
    engine: AnimationEngine,
}

impl LockWidget {
    /// Build a widget at rest from a validated configuration.
    pub fn new(config: LockConfig) -> Result<Self, LockError> {
        config.validate()?;
        let engine = AnimationEngine::from_config(&config);
        Ok(Self {
            config,
            machine: InteractionMachine::new(),
            engine,
        })
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn context(&self) -> LockContext {
        self.machine.context()
    }

    pub fn machine(&self) -> &InteractionMachine {
        &self.machine
    }

    pub fn engine(&self) -> &AnimationEngine {
        &self.engine
    }

    pub fn scene(&self) -> Scene {
        self.engine.scene()
    }

    /// No animation is waiting for a frame.
    pub fn is_idle(&self) -> bool {
        self.engine.is_idle()
    }

    /// Store the combination as typed. Range checks happen on unlock.
    pub fn set_combination(&mut self, digits: [u32; 3]) -> Result<(), LockError> {
        self.require_start("combination")?;
        self.config.combination = Combination::from(digits);
        Ok(())
    }

    pub fn set_ticks_on_dial(&mut self, ticks_on_dial: u32) -> Result<(), LockError> {
        self.require_start("ticks_on_dial")?;
        config::into_result(config::validate_ticks(ticks_on_dial))?;
        self.config.ticks_on_dial = ticks_on_dial;
        self.engine.set_ticks_on_dial(ticks_on_dial);
        Ok(())
    }

    /// Change the turn rate. Applies from the next frame, even mid-turn.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), LockError> {
        config::into_result(config::validate_speed(speed))?;
        self.config.speed = speed;
        self.engine.set_speed(speed);
        Ok(())
    }

    pub fn unlock(&mut self) -> Result<Dispatch, LockError> {
        self.dispatch(LockEvent::Unlock)
    }

    pub fn step_by_step(&mut self) -> Result<Dispatch, LockError> {
        self.dispatch(LockEvent::StepByStep)
    }

    pub fn next_step(&mut self) -> Result<Dispatch, LockError> {
        self.dispatch(LockEvent::NextStep)
    }

    pub fn reset(&mut self) -> Result<Dispatch, LockError> {
        self.dispatch(LockEvent::Reset)
    }

    /// Fire `event` and run the commands of the resulting transition.
    ///
    /// Starting an animation checks the combination against the dial first;
    /// an out-of-range digit leaves the widget untouched.
    pub fn dispatch(&mut self, event: LockEvent) -> Result<Dispatch, LockError> {
        if self.phase() == Phase::Start
            && matches!(event, LockEvent::Unlock | LockEvent::StepByStep)
        {
            config::into_result(self.config.combination.validate(self.config.ticks_on_dial))?;
        }

        let dispatch = self.machine.dispatch(event);
        for command in dispatch.commands() {
            self.execute(*command);
        }
        Ok(dispatch)
    }

    /// Fire an event by its wire name, e.g. `"STEP_BY_STEP"`.
    pub fn dispatch_named(&mut self, name: &str) -> Result<Dispatch, LockError> {
        self.dispatch(name.parse()?)
    }

    /// Advance the animation to `now`, repaint if anything moved, and feed
    /// completions to the machine in the order they happened.
    pub fn frame<R: Renderer + ?Sized>(&mut self, now: Duration, renderer: &mut R) -> FrameOutcome {
        let outcome = self.engine.frame(now);
        if outcome.redraw {
            renderer.draw(&self.engine.scene());
        }
        for &completion in &outcome.completions {
            let dispatch = self.machine.dispatch(completion.into());
            for command in dispatch.commands() {
                self.execute(*command);
            }
        }
        outcome
    }

    /// Paint the current scene, e.g. when first mounted.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw(&self.engine.scene());
    }

    pub fn view(&self) -> View {
        let phase = self.phase();
        let step = self.machine.step();
        View {
            phase,
            step,
            controls: Controls::for_phase(phase, step),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            taken_at: Utc::now(),
            phase: self.phase(),
            context: self.context(),
            config: self.config.clone(),
            animation: self.engine.state().clone(),
            history: self.machine.history().clone(),
            history_span: self.machine.history().duration(),
        }
    }

    fn execute(&mut self, command: Command) {
        tracing::trace!(?command, "executing command");
        match command {
            Command::OpenLock { step_by_step } => self.engine.open_lock(
                self.config.combination,
                self.config.ticks_on_dial,
                step_by_step,
            ),
            Command::NextStep => self.engine.next_step(),
            Command::Reset => self.engine.reset(),
        }
    }

    fn require_start(&self, control: &'static str) -> Result<(), LockError> {
        let phase = self.phase();
        if phase == Phase::Start {
            Ok(())
        } else {
            Err(LockError::ControlDisabled { control, phase })
        }
    }
}
