//! Dial, shackle and reset animation.
//!
//! The engine is driven by the host's display refresh. Every call to
//! [`AnimationEngine::frame`] advances whichever loops are due and reports
//! any [`Completion`]s, which the widget feeds back to the interaction
//! machine as events.
//!
//! ```text
//! open_lock ──► [seg 1][seg 2][seg 3] pause [seg 4][seg 5] pause [seg 6]
//!                                                                   │
//!                               Rotation ◄──────────────────────────┘
//!                               zoom out ─► lift ─► Shackle
//!
//! reset ──► [return to zero] ─► Reset      (regrow alongside)
//! ```

mod animator;
pub mod easing;
pub mod schedule;
pub mod segment;
pub mod shackle;
mod state;

pub use animator::{pause_for, AnimationEngine, Completion, FrameOutcome, BASELINE_PAUSE};
pub use easing::{eased_increment, frame_step, BASELINE_SPEED};
pub use schedule::FrameRequest;
pub use segment::{positions_to_radians, unlock_sequence, Digit, RotationSegment};
pub use shackle::{regrow, Progress, ShackleMotion, ShacklePhase};
pub use state::{AnimationState, Mode, MIN_RADIUS_FRACTION};
