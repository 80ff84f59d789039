//! Cancellable frame requests.
//!
//! Each animation loop owns one `FrameRequest`. Asking for a frame replaces
//! whatever was pending, and cancelling drops it, so an abandoned loop never
//! runs again unless someone asks for it.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Wake {
    NextFrame,
    At(Duration),
}

/// Pending wake-up of one animation loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameRequest {
    wake: Option<Wake>,
}

impl FrameRequest {
    /// Run on the next display refresh.
    pub fn next_frame(&mut self) {
        self.wake = Some(Wake::NextFrame);
    }

    /// Run on the first display refresh at or after `now + delay`.
    pub fn after(&mut self, now: Duration, delay: Duration) {
        self.wake = Some(Wake::At(now.saturating_add(delay)));
    }

    /// Drop the pending wake-up. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.wake.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.wake.is_some()
    }

    /// Deadline of a timed wake-up.
    pub fn deadline(&self) -> Option<Duration> {
        match self.wake {
            Some(Wake::At(at)) => Some(at),
            _ => None,
        }
    }

    /// Consume the wake-up if it is due at `now`.
    pub fn take_due(&mut self, now: Duration) -> bool {
        let due = match self.wake {
            Some(Wake::NextFrame) => true,
            Some(Wake::At(at)) => now >= at,
            None => false,
        };
        if due {
            self.wake = None;
        }
        due
    }
}
