//! Thread-safe configuration storage.
//!
//! Keeps a map of known keys to string values plus a set of keys that are
//! exempt from completeness checks. Both live behind one read-write lock so
//! completeness queries always see a consistent view of the two.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::env::{EnvSource, ProcessEnv};
use crate::config::error::ConfigError;
use crate::config::manifest::Manifest;
use crate::config::notice::{IgnoreNotice, NoticeSink, TracingSink};
use crate::config::report::KeyStatus;

/// Thread-safe key/value config store with an ignore list.
///
/// Unset keys hold an empty string. A key that was never declared and a
/// key declared but not yet set both read back as `""` from [`get`];
/// use [`get_opt`] when the difference matters.
///
/// Cloning performs a deep copy (see [`copy`]). Share one store between
/// threads with `Arc<ConfigStore>`.
///
/// [`get`]: ConfigStore::get
/// [`get_opt`]: ConfigStore::get_opt
/// [`copy`]: ConfigStore::copy
pub struct ConfigStore {
    inner: RwLock<StoreInner>,
    sink: Arc<dyn NoticeSink>,
}

#[derive(Clone, Default)]
struct StoreInner {
    values: HashMap<String, String>,
    ignored: HashSet<String>,
}

impl StoreInner {
    fn is_missing(&self, key: &str, value: &str) -> bool {
        value.is_empty() && !self.ignored.contains(key)
    }

    fn insert_ignored(&mut self, key: &str) -> IgnoreNotice {
        if self.ignored.insert(key.to_string()) {
            IgnoreNotice::Added(key.to_string())
        } else {
            IgnoreNotice::AlreadyPresent(key.to_string())
        }
    }
}

impl ConfigStore {
    /// Create a store whose known keys are `default_keys` (all unset) and
    /// whose ignore list is `ignore_keys`. Duplicates collapse.
    pub fn new<K, I>(default_keys: K, ignore_keys: I) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let inner = StoreInner {
            values: default_keys
                .into_iter()
                .map(|k| (k.into(), String::new()))
                .collect(),
            ignored: ignore_keys.into_iter().map(Into::into).collect(),
        };

        Self {
            inner: RwLock::new(inner),
            sink: Arc::new(TracingSink),
        }
    }

    /// Create a store from a manifest's keys and ignore list.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self::new(&manifest.keys, &manifest.ignore)
    }

    /// Replace the sink that receives ignore-list notices.
    pub fn with_sink(mut self, sink: Arc<dyn NoticeSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Independent deep copy of the current values and ignore list.
    ///
    /// The copy shares the notice sink but no state: later writes to either
    /// store are invisible to the other.
    pub fn copy(&self) -> Self {
        let inner = self.inner.read().clone();
        Self {
            inner: RwLock::new(inner),
            sink: Arc::clone(&self.sink),
        }
    }

    /// Forget every key and value. The ignore list is untouched.
    pub fn clear_values(&self) {
        self.inner.write().values = HashMap::new();
        tracing::debug!("Cleared config values");
    }

    /// Empty the ignore list. Values are untouched.
    pub fn clear_ignored(&self) {
        self.inner.write().ignored = HashSet::new();
        tracing::debug!("Cleared ignored keys");
    }

    /// Insert or overwrite `key`. Unknown keys become known.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        tracing::trace!(key = %key, "Set config value");
        self.inner.write().values.insert(key, value.into());
    }

    /// Value of `key`, or `""` if it is unset or unknown.
    pub fn get(&self, key: &str) -> String {
        self.inner.read().values.get(key).cloned().unwrap_or_default()
    }

    /// Value of `key`, or `None` if the key is not known.
    ///
    /// Known-but-unset keys return `Some("")`.
    pub fn get_opt(&self, key: &str) -> Option<String> {
        self.inner.read().values.get(key).cloned()
    }

    /// Whether `key` is a known key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.read().values.contains_key(key)
    }

    /// Remove `key`. No-op if it is not known.
    pub fn delete(&self, key: &str) {
        if self.inner.write().values.remove(key).is_some() {
            tracing::trace!(key = %key, "Deleted config key");
        }
    }

    /// Snapshot of the known keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().values.keys().cloned().collect()
    }

    /// Number of known keys.
    pub fn size(&self) -> usize {
        self.inner.read().values.len()
    }

    /// Alias for [`size`](ConfigStore::size).
    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().values.is_empty()
    }

    /// Add every key in `keys` to the ignore list.
    ///
    /// One notice per key is sent to the sink, in input order, after the
    /// lock is released.
    pub fn add_ignored<I>(&self, keys: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let notices: Vec<IgnoreNotice> = {
            let mut inner = self.inner.write();
            keys.into_iter()
                .map(|k| inner.insert_ignored(k.as_ref()))
                .collect()
        };
        self.emit(&notices);
    }

    /// Add a single key to the ignore list.
    pub fn add_ignored_one(&self, key: &str) {
        let notice = self.inner.write().insert_ignored(key);
        self.emit(&[notice]);
    }

    /// Remove `key` from the ignore list, reporting whether it was there.
    pub fn remove_ignored(&self, key: &str) {
        let removed = self.inner.write().ignored.remove(key);
        let notice = if removed {
            IgnoreNotice::Removed(key.to_string())
        } else {
            IgnoreNotice::NotFound(key.to_string())
        };
        self.emit(&[notice]);
    }

    /// Snapshot of the ignore list, in no particular order.
    pub fn ignored_keys(&self) -> Vec<String> {
        self.inner.read().ignored.iter().cloned().collect()
    }

    /// Whether `key` is on the ignore list.
    pub fn is_ignored(&self, key: &str) -> bool {
        self.inner.read().ignored.contains(key)
    }

    /// Overwrite every known key with the process environment variable of
    /// the same name.
    pub fn load_from_environment(&self) {
        self.load_from(&ProcessEnv);
    }

    /// Overwrite every known key with its value from `env`.
    ///
    /// Keys absent from `env` become unset. The write lock is held for the
    /// whole scan, so `env` must be a fast local lookup.
    pub fn load_from<E: EnvSource + ?Sized>(&self, env: &E) {
        let mut inner = self.inner.write();
        for (key, value) in inner.values.iter_mut() {
            *value = env.lookup(key);
        }

        tracing::debug!(keys = inner.values.len(), "Loaded config values from environment");
    }

    /// True iff every known key that is not ignored has a non-empty value.
    ///
    /// An empty store is complete.
    pub fn is_complete(&self) -> bool {
        let inner = self.inner.read();
        !inner.values.iter().any(|(k, v)| inner.is_missing(k, v))
    }

    /// Known keys with empty values, excluding ignored keys.
    pub fn missing_keys(&self) -> Vec<String> {
        let inner = self.inner.read();
        inner
            .values
            .iter()
            .filter(|(k, v)| inner.is_missing(k, v))
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Every known key with its value, regardless of the ignore list.
    pub fn all_keys_status(&self) -> Vec<KeyStatus> {
        self.inner
            .read()
            .values
            .iter()
            .map(|(k, v)| KeyStatus::new(k.as_str(), v))
            .collect()
    }

    /// `Ok` if the store is complete, otherwise the sorted missing keys.
    pub fn require_complete(&self) -> Result<(), ConfigError> {
        let mut missing = self.missing_keys();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort();
        Err(ConfigError::Incomplete { missing })
    }

    fn emit(&self, notices: &[IgnoreNotice]) {
        for notice in notices {
            self.sink.notify(notice);
        }
    }
}

impl Clone for ConfigStore {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Vec::<String>::new(), Vec::<String>::new())
    }
}

impl fmt::Debug for ConfigStore {
    // Values may be secrets; only key names are shown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        let mut keys: Vec<&String> = inner.values.keys().collect();
        keys.sort();
        let mut ignored: Vec<&String> = inner.ignored.iter().collect();
        ignored.sort();
        f.debug_struct("ConfigStore")
            .field("keys", &keys)
            .field("ignored", &ignored)
            .finish()
    }
}
