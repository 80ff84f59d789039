//! Core state machine types.
//!
//! This module contains the pure building blocks shared by the interaction
//! machine:
//! - State definitions via the `State` trait
//! - Named guard predicates for transition control
//! - Bounded transition history
//!
//! Nothing in here performs I/O or touches animation state.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_CAPACITY};
pub use state::State;
