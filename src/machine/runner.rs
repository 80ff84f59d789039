//! Stateful wrapper around the pure transition function.

use crate::core::{StateHistory, StateTransition};
use crate::machine::phase::{LockContext, Phase};
use crate::machine::transition::{transition, Command};
use crate::machine::LockEvent;
use chrono::Utc;

/// History of phase transitions kept by the machine.
pub type PhaseHistory = StateHistory<Phase, LockEvent>;

/// Result of dispatching one event.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Dispatch {
    /// The event fired a transition.
    Transitioned {
        from: Phase,
        to: Phase,
        commands: Vec<Command>,
    },
    /// No transition is defined for the event in the current phase.
    Ignored { phase: Phase },
}

impl Dispatch {
    /// Commands to run; empty when the event was ignored.
    pub fn commands(&self) -> &[Command] {
        match self {
            Self::Transitioned { commands, .. } => commands,
            Self::Ignored { .. } => &[],
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored { .. })
    }
}

/// Hierarchical interaction machine for one widget.
///
/// Starts in `start` with `step = 0, animating = false` and cycles for as
/// long as the widget exists.
#[derive(Clone, Debug, Default)]
pub struct InteractionMachine {
    phase: Phase,
    context: LockContext,
    history: PhaseHistory,
}

impl InteractionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Machine with a custom history window.
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            history: StateHistory::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn context(&self) -> LockContext {
        self.context
    }

    pub fn step(&self) -> u8 {
        self.context.step
    }

    pub fn history(&self) -> &PhaseHistory {
        &self.history
    }

    /// Events that fired a transition, oldest first, within the retained
    /// history window.
    pub fn fired_events(&self) -> Vec<LockEvent> {
        self.history.transitions().map(|t| t.event).collect()
    }

    /// Apply `event`, returning what happened and the commands to execute.
    pub fn dispatch(&mut self, event: LockEvent) -> Dispatch {
        let from = self.phase;
        let Some(next) = transition(from, self.context, event) else {
            tracing::debug!(phase = %from, %event, "event ignored");
            return Dispatch::Ignored { phase: from };
        };

        tracing::debug!(
            from = %from,
            to = %next.phase,
            %event,
            step = next.context.step,
            "phase transition"
        );

        self.history.record(StateTransition {
            from,
            to: next.phase,
            event,
            timestamp: Utc::now(),
        });
        self.phase = next.phase;
        self.context = next.context;

        Dispatch::Transitioned {
            from,
            to: next.phase,
            commands: next.commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;
    use crate::machine::phase::SubPhase;

    #[test]
    fn starts_idle_at_start() {
        let machine = InteractionMachine::new();
        assert_eq!(machine.phase(), Phase::Start);
        assert_eq!(machine.context(), LockContext::default());
        assert!(machine.history().is_empty());
    }

    #[test]
    fn full_unlock_cycle() {
        let mut machine = InteractionMachine::new();

        let d = machine.dispatch(LockEvent::Unlock);
        assert_eq!(
            d.commands(),
            &[Command::OpenLock {
                step_by_step: false
            }]
        );
        machine.dispatch(LockEvent::RotationDone);
        assert_eq!(machine.phase(), Phase::Unshackling(SubPhase::Active));
        machine.dispatch(LockEvent::ShackleDone);
        assert_eq!(machine.phase(), Phase::Unshackling(SubPhase::Idle));
        machine.dispatch(LockEvent::Reset);
        machine.dispatch(LockEvent::ResetDone);
        assert_eq!(machine.phase(), Phase::Start);
        assert!(!machine.context().animating);

        let path: Vec<_> = machine
            .history()
            .get_path()
            .into_iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(
            path,
            vec![
                "start",
                "unlocking",
                "unshackling.active",
                "unshackling.idle",
                "resetting",
                "start"
            ]
        );
    }

    #[test]
    fn step_by_step_walks_three_digits() {
        let mut machine = InteractionMachine::new();
        machine.dispatch(LockEvent::StepByStep);

        for expected_step in 1..=2 {
            assert_eq!(machine.step(), expected_step);
            machine.dispatch(LockEvent::RotationDone);
            assert_eq!(machine.phase(), Phase::Stepping(SubPhase::Idle));
            let d = machine.dispatch(LockEvent::NextStep);
            assert_eq!(d.commands(), &[Command::NextStep]);
        }

        assert_eq!(machine.step(), 3);
        machine.dispatch(LockEvent::RotationDone);
        assert_eq!(machine.phase(), Phase::Unshackling(SubPhase::Active));
        assert_eq!(machine.step(), 0);
    }

    #[test]
    fn ignored_event_leaves_no_trace() {
        let mut machine = InteractionMachine::new();
        let d = machine.dispatch(LockEvent::NextStep);

        assert!(d.is_ignored());
        assert!(d.commands().is_empty());
        assert_eq!(machine.phase(), Phase::Start);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn history_records_triggering_event() {
        let mut machine = InteractionMachine::with_history_capacity(4);
        machine.dispatch(LockEvent::StepByStep);

        let last = machine.history().last().unwrap();
        assert_eq!(last.event, LockEvent::StepByStep);
        assert_eq!(last.from, Phase::Start);
        assert_eq!(machine.history().capacity(), 4);
    }
}
