use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

/// Declares which keys a process expects and which of them are optional.
///
/// ```toml
/// keys = ["DATABASE_URL", "PORT"]
/// ignore = ["PORT"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Known keys, each seeded with an empty value.
    #[serde(default)]
    pub keys: Vec<String>,
    /// Keys exempt from completeness checks.
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Manifest {
    /// Returns the path to the default manifest.
    ///
    /// Uses `~/.config/runtime-config/keys.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("runtime-config").join("keys.toml")
    }

    /// Parse a manifest from TOML text.
    ///
    /// `path` is only used for error reporting.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let manifest: Manifest = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Loads and validates a manifest from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let manifest = Self::parse(&content, path)?;

        tracing::debug!(
            path = %path.display(),
            keys = manifest.keys.len(),
            ignored = manifest.ignore.len(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// Checks that no key name is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keys.iter().chain(&self.ignore).any(|k| k.is_empty()) {
            return Err(ConfigError::ValidationError {
                message: "Key names must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Append keys and ignores from another source (e.g. the command line).
    pub fn extend(
        &mut self,
        keys: impl IntoIterator<Item = String>,
        ignore: impl IntoIterator<Item = String>,
    ) {
        self.keys.extend(keys);
        self.ignore.extend(ignore);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_is_optional() {
        let manifest = Manifest::parse(r#"keys = ["HOST"]"#, Path::new("m.toml")).unwrap();
        assert_eq!(manifest.keys, vec!["HOST".to_string()]);
        assert!(manifest.ignore.is_empty());
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = Manifest::parse(r#"keys = ["HOST", ""]"#, Path::new("m.toml"));
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let result = Manifest::parse("keys = [", Path::new("m.toml"));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_default_path_ends_with_expected() {
        assert!(Manifest::default_path().ends_with("runtime-config/keys.toml"));
    }
}
