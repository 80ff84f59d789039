//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over the machine's extended context.
//! They are plain function pointers so a guard can live in a `const` and be
//! shared by every machine instance.

use std::fmt;

/// Named, pure predicate that decides whether a guarded transition may fire.
///
/// # Example
///
/// ```rust
/// use combolock::core::Guard;
///
/// fn below_limit(count: &u8) -> bool {
///     *count < 3
/// }
///
/// const BELOW_LIMIT: Guard<u8> = Guard::new("count < 3", below_limit);
///
/// assert!(BELOW_LIMIT.check(&2));
/// assert!(!BELOW_LIMIT.check(&3));
/// assert_eq!(BELOW_LIMIT.name(), "count < 3");
/// ```
pub struct Guard<T> {
    name: &'static str,
    predicate: fn(&T) -> bool,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate.
    pub const fn new(name: &'static str, predicate: fn(&T) -> bool) -> Self {
        Self { name, predicate }
    }

    /// Evaluate the predicate.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }

    /// Human readable condition, used in trace output.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Guard<T> {}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("name", &self.name).finish()
    }
}
