//! Combolock: an animated combination-lock widget core
//!
//! The widget shows a padlock whose dial spins through a three-number
//! combination and whose shackle then lifts open. It is split the way a
//! "pure core, imperative shell" design splits things:
//!
//! - **Interaction machine** (`machine`): a pure transition function over
//!   the user-visible phase and step counter. Transitions return commands
//!   instead of touching the animation.
//! - **Animation engine** (`engine`): frame-driven dial rotation, shackle
//!   opening and reset regrowth. Reports completions back as events.
//! - **Widget shell** (`widget`): validates form input, executes commands
//!   and exposes which controls the host should enable.
//!
//! Painting is left to the host through the [`Renderer`] trait.
//!
//! # Example
//!
//! ```rust
//! use combolock::{LockConfig, LockWidget, Phase, Scene};
//! use std::time::Duration;
//!
//! let mut widget = LockWidget::new(LockConfig::default()).unwrap();
//! let mut frames = 0;
//! let mut renderer = |_: &Scene| frames += 1;
//!
//! widget.step_by_step().unwrap();
//! let mut now = Duration::ZERO;
//! while !widget.is_idle() {
//!     now += Duration::from_millis(16);
//!     widget.frame(now, &mut renderer);
//! }
//!
//! // First number dialed; waiting for the user.
//! assert_eq!(widget.view().phase, Phase::Stepping(combolock::SubPhase::Idle));
//! assert!(widget.view().controls.next_step.is_enabled());
//! assert!(frames > 0);
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod machine;
pub mod render;
pub mod widget;

// Re-export commonly used types
pub use config::{Combination, ConfigError, LockConfig};
pub use core::{Guard, State, StateHistory, StateTransition};
pub use engine::{AnimationEngine, Completion, FrameOutcome};
pub use error::LockError;
pub use machine::{Dispatch, InteractionMachine, LockContext, LockEvent, Phase, SubPhase};
pub use render::{NoopRenderer, Renderer, Scene};
pub use widget::{ButtonState, Controls, LockWidget, Snapshot, View};
