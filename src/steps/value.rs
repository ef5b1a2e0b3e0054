//! Values that are either literal or computed from state.
//!
//! Step names, shell commands and arguments, prompt queries and defaults, and
//! step conditionals may all depend on answers captured earlier in the run.
//! [`Dynamic`] holds either form and [`Dynamic::resolve`] is the single place
//! they are turned into concrete values.

use std::fmt;
use std::sync::Arc;

use crate::state::State;

/// A literal value or a function of the current state.
pub enum Dynamic<T> {
    /// Fixed at definition time.
    Literal(T),
    /// Computed from state when the step executes.
    Computed(Arc<dyn Fn(&State) -> T + Send + Sync>),
}

impl<T: Clone> Dynamic<T> {
    /// Wrap a literal value.
    pub fn literal(value: T) -> Self {
        Dynamic::Literal(value)
    }

    /// Wrap a function of state.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&State) -> T + Send + Sync + 'static,
    {
        Dynamic::Computed(Arc::new(f))
    }

    /// Resolve against the current state.
    pub fn resolve(&self, state: &State) -> T {
        match self {
            Dynamic::Literal(value) => value.clone(),
            Dynamic::Computed(f) => f(state),
        }
    }

    /// Whether this value depends on state.
    pub fn is_computed(&self) -> bool {
        matches!(self, Dynamic::Computed(_))
    }
}

impl<T: Clone> Clone for Dynamic<T> {
    fn clone(&self) -> Self {
        match self {
            Dynamic::Literal(value) => Dynamic::Literal(value.clone()),
            Dynamic::Computed(f) => Dynamic::Computed(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Dynamic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Dynamic::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl Default for Dynamic<String> {
    fn default() -> Self {
        Dynamic::Literal(String::new())
    }
}

impl From<&str> for Dynamic<String> {
    fn from(value: &str) -> Self {
        Dynamic::Literal(value.to_string())
    }
}

impl From<String> for Dynamic<String> {
    fn from(value: String) -> Self {
        Dynamic::Literal(value)
    }
}

impl From<&String> for Dynamic<String> {
    fn from(value: &String) -> Self {
        Dynamic::Literal(value.clone())
    }
}

/// Gate deciding whether a step runs.
pub type Conditional = Dynamic<bool>;

/// An absent conditional means "run".
impl Default for Dynamic<bool> {
    fn default() -> Self {
        Dynamic::Literal(true)
    }
}

impl From<bool> for Dynamic<bool> {
    fn from(value: bool) -> Self {
        Dynamic::Literal(value)
    }
}

/// Evaluate a step's conditional.
///
/// Only an explicit `false` skips the step. Must not mutate state.
pub fn should_run(conditional: &Conditional, state: &State) -> bool {
    conditional.resolve(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_resolves_to_itself() {
        let state = State::new();
        let value: Dynamic<String> = "timedatectl".into();
        assert_eq!(value.resolve(&state), "timedatectl");
        assert!(!value.is_computed());
    }

    #[test]
    fn computed_reads_current_state() {
        let state = State::new();
        let query = Dynamic::computed(|s: &State| {
            format!(
                "enter a password for user '{}':",
                s.render("user").unwrap_or_default()
            )
        });

        state.set("user", "alice");
        assert_eq!(query.resolve(&state), "enter a password for user 'alice':");

        state.set("user", "bob");
        assert_eq!(query.resolve(&state), "enter a password for user 'bob':");
        assert!(query.is_computed());
    }

    #[test]
    fn resolving_is_repeatable() {
        let state = State::new();
        state.set("n", 3);
        let value = Dynamic::computed(|s: &State| s.get_i64("n").unwrap_or(0) * 2);
        assert_eq!(value.resolve(&state), 6);
        assert_eq!(value.resolve(&state), 6);
    }

    #[test]
    fn clone_shares_function() {
        let value = Dynamic::computed(|_: &State| 7);
        let copy = value.clone();
        assert_eq!(copy.resolve(&State::new()), 7);
    }

    #[test]
    fn absent_conditional_runs() {
        assert!(should_run(&Conditional::default(), &State::new()));
    }

    #[test]
    fn literal_false_skips() {
        assert!(!should_run(&false.into(), &State::new()));
        assert!(should_run(&true.into(), &State::new()));
    }

    #[test]
    fn computed_conditional_uses_state() {
        let state = State::new();
        let when_xorg = Conditional::computed(|s: &State| s.get_bool("xorg") == Some(true));
        assert!(!should_run(&when_xorg, &state));
        state.set("xorg", true);
        assert!(should_run(&when_xorg, &state));
    }

    #[test]
    fn debug_hides_closures() {
        let value: Dynamic<String> = Dynamic::computed(|_: &State| "x".to_string());
        assert_eq!(format!("{:?}", value), "Computed(..)");
        let lit: Dynamic<String> = "y".into();
        assert_eq!(format!("{:?}", lit), "Literal(\"y\")");
    }
}
