//! Environment variable lookup.
//!
//! The store never touches `std::env` directly. It reads through an
//! [`EnvSource`], so tests and embedders can substitute their own
//! environment.

use std::collections::HashMap;

/// Source of environment variable values.
///
/// Lookups are exact-name and case-sensitive. A variable that is not set
/// yields an empty string; lookups never fail.
pub trait EnvSource: Send + Sync {
    /// Get the value of `name`, or `""` if it is not set.
    fn lookup(&self, name: &str) -> String;
}

/// The real process environment.
///
/// Values that are not valid UTF-8 are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, name: &str) -> String {
        std::env::var(name).unwrap_or_default()
    }
}

/// In-memory environment backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn lookup(&self, name: &str) -> String {
        self.vars.get(name).cloned().unwrap_or_default()
    }
}

impl<F> EnvSource for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn lookup(&self, name: &str) -> String {
        self(name)
    }
}
