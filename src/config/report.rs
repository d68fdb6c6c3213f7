//! Status records and their text rendering.

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

/// Status of one known key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyStatus {
    pub key: String,
    /// `None` when the stored value is empty.
    pub value: Option<String>,
}

impl KeyStatus {
    pub fn new(key: impl Into<String>, value: &str) -> Self {
        Self {
            key: key.into(),
            value: (!value.is_empty()).then(|| value.to_string()),
        }
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {}", self.key, value),
            None => write!(f, "{}: (not set)", self.key),
        }
    }
}

/// Sort records by key for stable output.
pub fn sorted(mut statuses: Vec<KeyStatus>) -> Vec<KeyStatus> {
    statuses.sort_by(|a, b| a.key.cmp(&b.key));
    statuses
}

/// Write one `KEY: value` line per record.
pub fn write_lines<W: Write>(mut writer: W, statuses: &[KeyStatus]) -> io::Result<()> {
    for status in statuses {
        writeln!(writer, "{}", status)?;
    }
    writer.flush()
}
