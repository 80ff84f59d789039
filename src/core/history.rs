//! Transition history tracking.
//!
//! A widget lives for as long as its host page, so the history is a bounded
//! window over the most recent transitions rather than an ever-growing log.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt::Debug;
use std::time::Duration;

/// Number of transitions kept when no explicit capacity is given.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Record of a single state transition and the event that caused it.
///
/// # Example
///
/// ```rust
/// use combolock::core::StateTransition;
/// use combolock::machine::{LockEvent, Phase, SubPhase};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Phase::Start,
///     to: Phase::Stepping(SubPhase::Active),
///     event: LockEvent::StepByStep,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, Phase::Stepping(SubPhase::Active));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S, E>
where
    S: State,
    E: Clone + Debug + Serialize + DeserializeOwned,
{
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The event that triggered the transition
    pub event: E,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of state transitions.
///
/// When full, recording a transition evicts the oldest one.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S, E>
where
    S: State,
    E: Clone + Debug + Serialize + DeserializeOwned,
{
    transitions: VecDeque<StateTransition<S, E>>,
    capacity: usize,
}

impl<S, E> Default for StateHistory<S, E>
where
    S: State,
    E: Clone + Debug + Serialize + DeserializeOwned,
{
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl<S, E> StateHistory<S, E>
where
    S: State,
    E: Clone + Debug + Serialize + DeserializeOwned,
{
    /// Create an empty history with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history holding at most `capacity` transitions.
    ///
    /// A capacity of zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            transitions: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition<S, E>) {
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// States traversed within the retained window.
    ///
    /// Returns the `from` of the oldest retained transition followed by the
    /// `to` of every transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Time between the oldest and newest retained transition.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.transitions.front()?;
        let last = self.transitions.back()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Iterate over retained transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<S, E>> {
        self.transitions.iter()
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&StateTransition<S, E>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
