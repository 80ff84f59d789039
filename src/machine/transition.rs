//! Pure transition function of the interaction machine.
//!
//! `transition` maps `(phase, context, event)` to the next phase, the next
//! context and the commands the shell must run against the animation engine.
//! Events with no transition from the current phase yield `None`.

use crate::core::Guard;
use crate::machine::phase::{LockContext, Phase, SubPhase};
use crate::machine::LockEvent;
use serde::{Deserialize, Serialize};

/// Side effect requested by a transition.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Queue the rotations for the current combination and start turning.
    OpenLock { step_by_step: bool },
    /// Resume turning after a step-by-step pause.
    NextStep,
    /// Drop queued rotations and spin home.
    Reset,
}

/// Outcome of a transition that fired.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Transition {
    pub phase: Phase,
    pub context: LockContext,
    pub commands: Vec<Command>,
}

impl Transition {
    fn to(phase: Phase, context: LockContext) -> Self {
        Self {
            phase,
            context,
            commands: Vec::new(),
        }
    }

    fn with(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }
}

/// `stepping.active --ROTATION_DONE--> stepping.idle` only fires while a
/// digit is left; on the final digit the event falls through to the parent
/// `stepping` handler and moves to `unshackling`.
pub const STEPS_REMAINING: Guard<LockContext> =
    Guard::new("step < 3", LockContext::has_steps_remaining);

/// Compute the transition for `event`, if any.
pub fn transition(phase: Phase, context: LockContext, event: LockEvent) -> Option<Transition> {
    use LockEvent as E;
    use Phase as P;

    let ctx = context;
    let next = match (phase, event) {
        (P::Start, E::Unlock) => Transition::to(
            P::Unlocking,
            LockContext {
                animating: true,
                ..ctx
            },
        )
        .with(Command::OpenLock {
            step_by_step: false,
        }),
        (P::Start, E::StepByStep) => Transition::to(
            P::Stepping(SubPhase::Active),
            LockContext {
                step: 1,
                animating: true,
            },
        )
        .with(Command::OpenLock { step_by_step: true }),

        (P::Unlocking, E::RotationDone) => Transition::to(P::Unshackling(SubPhase::Active), ctx),
        (P::Unlocking, E::Reset) => Transition::to(
            P::Resetting,
            LockContext {
                animating: true,
                ..ctx
            },
        )
        .with(Command::Reset),

        (P::Resetting, E::ResetDone) => Transition::to(P::Start, LockContext::default()),

        (P::Stepping(SubPhase::Active), E::RotationDone) if STEPS_REMAINING.check(&ctx) => {
            Transition::to(P::Stepping(SubPhase::Idle), ctx)
        }
        (P::Stepping(SubPhase::Idle), E::NextStep) => Transition::to(
            P::Stepping(SubPhase::Active),
            LockContext {
                step: ctx.next_step(),
                ..ctx
            },
        )
        .with(Command::NextStep),
        (P::Stepping(_), E::RotationDone) => Transition::to(
            P::Unshackling(SubPhase::Active),
            LockContext { step: 0, ..ctx },
        ),
        (P::Stepping(_), E::Reset) => {
            Transition::to(P::Resetting, LockContext { step: 0, ..ctx }).with(Command::Reset)
        }

        (P::Unshackling(SubPhase::Active), E::ShackleDone) => {
            Transition::to(P::Unshackling(SubPhase::Idle), ctx)
        }
        (P::Unshackling(_), E::Reset) => Transition::to(P::Resetting, ctx).with(Command::Reset),

        _ => return None,
    };
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(step: u8) -> LockContext {
        LockContext {
            step,
            animating: true,
        }
    }

    #[test]
    fn unlock_from_start_opens_lock() {
        let t = transition(Phase::Start, LockContext::default(), LockEvent::Unlock).unwrap();
        assert_eq!(t.phase, Phase::Unlocking);
        assert!(t.context.animating);
        assert_eq!(
            t.commands,
            vec![Command::OpenLock {
                step_by_step: false
            }]
        );
    }

    #[test]
    fn step_by_step_starts_at_first_digit() {
        let t = transition(Phase::Start, LockContext::default(), LockEvent::StepByStep).unwrap();
        assert_eq!(t.phase, Phase::Stepping(SubPhase::Active));
        assert_eq!(t.context.step, 1);
        assert_eq!(t.commands, vec![Command::OpenLock { step_by_step: true }]);
    }

    #[test]
    fn rotation_done_pauses_between_digits() {
        let t = transition(
            Phase::Stepping(SubPhase::Active),
            ctx(2),
            LockEvent::RotationDone,
        )
        .unwrap();
        assert_eq!(t.phase, Phase::Stepping(SubPhase::Idle));
        assert_eq!(t.context.step, 2);
        assert!(t.commands.is_empty());
    }

    #[test]
    fn rotation_done_on_final_digit_unshackles() {
        let t = transition(
            Phase::Stepping(SubPhase::Active),
            ctx(3),
            LockEvent::RotationDone,
        )
        .unwrap();
        assert_eq!(t.phase, Phase::Unshackling(SubPhase::Active));
        assert_eq!(t.context.step, 0);
    }

    #[test]
    fn next_step_advances_and_resumes_engine() {
        let t = transition(Phase::Stepping(SubPhase::Idle), ctx(1), LockEvent::NextStep).unwrap();
        assert_eq!(t.phase, Phase::Stepping(SubPhase::Active));
        assert_eq!(t.context.step, 2);
        assert_eq!(t.commands, vec![Command::NextStep]);
    }

    #[test]
    fn next_step_is_ignored_while_turning() {
        assert!(transition(
            Phase::Stepping(SubPhase::Active),
            ctx(1),
            LockEvent::NextStep
        )
        .is_none());
    }

    #[test]
    fn reset_from_stepping_clears_step() {
        for sub in [SubPhase::Active, SubPhase::Idle] {
            let t = transition(Phase::Stepping(sub), ctx(2), LockEvent::Reset).unwrap();
            assert_eq!(t.phase, Phase::Resetting);
            assert_eq!(t.context.step, 0);
            assert_eq!(t.commands, vec![Command::Reset]);
        }
    }

    #[test]
    fn reset_done_returns_to_start() {
        let t = transition(Phase::Resetting, ctx(0), LockEvent::ResetDone).unwrap();
        assert_eq!(t.phase, Phase::Start);
        assert_eq!(t.context, LockContext::default());
    }

    #[test]
    fn shackle_done_settles_unshackling() {
        let t = transition(
            Phase::Unshackling(SubPhase::Active),
            ctx(0),
            LockEvent::ShackleDone,
        )
        .unwrap();
        assert_eq!(t.phase, Phase::Unshackling(SubPhase::Idle));
    }

    #[test]
    fn reset_is_ignored_at_start_and_while_resetting() {
        assert!(transition(Phase::Start, LockContext::default(), LockEvent::Reset).is_none());
        assert!(transition(Phase::Resetting, ctx(0), LockEvent::Reset).is_none());
    }

    #[test]
    fn completions_are_ignored_at_start() {
        for event in [
            LockEvent::RotationDone,
            LockEvent::ShackleDone,
            LockEvent::ResetDone,
        ] {
            assert!(transition(Phase::Start, LockContext::default(), event).is_none());
        }
    }

    #[test]
    fn guard_reports_condition() {
        assert_eq!(STEPS_REMAINING.name(), "step < 3");
        assert!(STEPS_REMAINING.check(&ctx(2)));
        assert!(!STEPS_REMAINING.check(&ctx(3)));
    }
}
