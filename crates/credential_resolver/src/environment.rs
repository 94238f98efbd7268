//! Environment variable access behind a trait.
//!
//! Resolution logic never calls `std::env` directly; it reads through
//! [`Environment`] so tests and embedders can supply a fixed variable set
//! without mutating process state.

use std::collections::HashMap;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "environment_tests.rs"]
mod tests;

/// Read access to environment variables.
pub trait Environment: Send + Sync {
    /// Returns the raw value of `name`, or `None` when the variable is unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads from the real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed variable set backed by a map.
#[derive(Debug, Default, Clone)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an environment from `(name, value)` pairs.
    pub fn from_pairs<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Adds a variable, replacing any previous value.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// The value of `name` if it is set and non-empty. Resolution treats unset
/// and empty identically throughout.
pub(crate) fn non_empty_var(env: &dyn Environment, name: &str) -> Option<String> {
    env.var(name).filter(|value| !value.is_empty())
}
