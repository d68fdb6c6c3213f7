use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading a manifest or gating on completeness.
///
/// Store reads and writes never fail; only the manifest loader and
/// [`ConfigStore::require_complete`](crate::config::ConfigStore::require_complete)
/// produce these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read manifest '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Manifest validation failed: {message}")]
    ValidationError { message: String },

    #[error("Configuration incomplete, missing: {}", .missing.join(", "))]
    Incomplete { missing: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_lists_missing_keys() {
        let err = ConfigError::Incomplete {
            missing: vec!["HOST".to_string(), "USER".to_string()],
        };
        assert_eq!(err.to_string(), "Configuration incomplete, missing: HOST, USER");
    }
}
