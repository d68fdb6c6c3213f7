//! Notices emitted when the ignored-key set changes.

use std::fmt;

use parking_lot::Mutex;

/// Outcome of adding or removing one ignored key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreNotice {
    /// The key was newly added.
    Added(String),
    /// The key was already ignored; nothing changed.
    AlreadyPresent(String),
    /// The key was removed.
    Removed(String),
    /// The key was not ignored; nothing changed.
    NotFound(String),
}

impl IgnoreNotice {
    /// The key this notice is about.
    pub fn key(&self) -> &str {
        match self {
            IgnoreNotice::Added(key)
            | IgnoreNotice::AlreadyPresent(key)
            | IgnoreNotice::Removed(key)
            | IgnoreNotice::NotFound(key) => key,
        }
    }

    /// Whether the ignored set actually changed.
    pub fn changed(&self) -> bool {
        matches!(self, IgnoreNotice::Added(_) | IgnoreNotice::Removed(_))
    }
}

impl fmt::Display for IgnoreNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreNotice::Added(key) => write!(f, "Key '{}' added to ignored keys.", key),
            IgnoreNotice::AlreadyPresent(key) => {
                write!(f, "Key '{}' is already in ignored keys.", key)
            }
            IgnoreNotice::Removed(key) => write!(f, "Key '{}' removed from ignored keys.", key),
            IgnoreNotice::NotFound(key) => write!(f, "Key '{}' is not in ignored keys.", key),
        }
    }
}

/// Destination for [`IgnoreNotice`]s.
///
/// Called after the store lock has been released, so implementations may
/// read from or write to the store.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: &IgnoreNotice);
}

/// Default sink: forwards notices to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NoticeSink for TracingSink {
    fn notify(&self, notice: &IgnoreNotice) {
        tracing::info!(key = %notice.key(), changed = notice.changed(), "{}", notice);
    }
}

/// Sink that keeps every notice in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<IgnoreNotice>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<IgnoreNotice> {
        std::mem::take(&mut *self.notices.lock())
    }

    /// Copy of everything recorded so far.
    pub fn notices(&self) -> Vec<IgnoreNotice> {
        self.notices.lock().clone()
    }
}

impl NoticeSink for RecordingSink {
    fn notify(&self, notice: &IgnoreNotice) {
        self.notices.lock().push(notice.clone());
    }
}
