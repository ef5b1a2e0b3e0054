//! Schema-less key/value store threaded through a run.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mutable state shared by every step of a run.
///
/// Cloning a `State` yields another handle to the same map, which is how
/// output handlers running on other tasks see and mutate it. The lock is held
/// only for the duration of a single call, never across an await point.
#[derive(Clone, Default)]
pub struct State {
    fields: Arc<Mutex<Map<String, Value>>>,
}

impl State {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Map<String, Value>> {
        // A panicking handler must not make the rest of the run unusable.
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a copy of a field.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    /// Set a field, returning the previous value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.lock().insert(key.into(), value.into())
    }

    /// Remove a field, returning its value.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.lock().remove(key)
    }

    /// Check whether a field exists.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Get a string field. Non-string values return `None`.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get a boolean field. Non-boolean values return `None`.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    /// Get an integer field.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key)?.as_i64()
    }

    /// Render a field for display or interpolation.
    ///
    /// Strings are returned verbatim, `null` as the empty string, everything
    /// else as JSON.
    pub fn render(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    /// Apply a closure to the underlying map while holding the lock.
    ///
    /// Useful for read-modify-write updates such as appending to a list.
    pub fn update<R>(&self, f: impl FnOnce(&mut Map<String, Value>) -> R) -> R {
        f(&mut self.lock())
    }

    /// Copy of all fields.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.lock().clone()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no fields have been set.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl fmt::Debug for State {
    // Values may hold captured passwords, so only keys are shown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.lock().keys().cloned().collect();
        f.debug_struct("State").field("keys", &keys).finish()
    }
}
