//! Core State trait for widget phases.
//!
//! Phases are inspected through pure methods only. Hierarchical phases
//! report a dotted path (`"stepping.idle"`) so callers can match either a
//! parent state or a specific child.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: States are copied into the transition history
/// - `PartialEq`: States must be comparable for transition logic
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States appear in snapshots handed to hosts
///
/// # Example
///
/// ```rust
/// use combolock::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Door {
///     Closed,
///     Opening,
///     Open,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "closed",
///             Self::Opening => "opening",
///             Self::Open => "open",
///         }
///     }
/// }
///
/// assert!(Door::Opening.matches("opening"));
/// assert!(!Door::Open.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Dotted path of the state, e.g. `"stepping.active"`.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check whether this state is `path` or nested below it.
    ///
    /// `"stepping"` matches both `"stepping.active"` and `"stepping.idle"`,
    /// while `"stepping.idle"` only matches itself.
    fn matches(&self, path: &str) -> bool {
        let name = self.name();
        match name.strip_prefix(path) {
            Some("") => true,
            Some(rest) => rest.starts_with('.'),
            None => false,
        }
    }
}
