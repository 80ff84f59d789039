//! Interaction state machine.
//!
//! Tracks the user-visible phase of the widget and the step counter. Both UI
//! actions and animation completions arrive as [`LockEvent`]s; every fired
//! transition returns the [`Command`]s the shell must run against the
//! animation engine, so the machine itself never touches animation state.
//!
//! ```text
//! start ──UNLOCK──────────► unlocking ──ROTATION_DONE──► unshackling.active
//!   │                          │                              │ SHACKLE_DONE
//!   └─STEP_BY_STEP─► stepping.active ◄─NEXT_STEP─ stepping.idle   ▼
//!                         │   └──ROTATION_DONE [step<3]──┘   unshackling.idle
//!                         └──ROTATION_DONE [step=3]──► unshackling.active
//!
//! unlocking | stepping.* | unshackling.* ──RESET──► resetting ──RESET_DONE──► start
//! ```

mod event;
mod phase;
mod runner;
mod transition;

pub use event::LockEvent;
pub use phase::{LockContext, Phase, SubPhase, FINAL_STEP};
pub use runner::{Dispatch, InteractionMachine, PhaseHistory};
pub use transition::{transition, Command, Transition, STEPS_REMAINING};
