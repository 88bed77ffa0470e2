use crate::plugin::CreationPolicy;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Behavior switches shared by every registry in a context.
///
/// ```toml
/// strict-unregistration = true
/// verify-created-objects = false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct RegistryConfig {
    /// Fail removal of plugins that are not registered instead of ignoring them.
    pub strict_unregistration: bool,
    /// Check that created objects report the same key as their creator.
    pub verify_created_objects: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            strict_unregistration: false,
            verify_created_objects: CreationPolicy::default().verify_created_objects,
        }
    }
}

impl RegistryConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigLoadError> {
        toml::from_str(content).map_err(|e| ConfigLoadError::Toml {
            path: "<inline>".to_string(),
            source: e,
        })
    }

    pub fn creation_policy(&self) -> CreationPolicy {
        CreationPolicy {
            verify_created_objects: self.verify_created_objects,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Builds a [`RegistryConfig`]; unset fields keep their defaults.
#[derive(Default)]
pub struct RegistryConfigBuilder {
    strict_unregistration: Option<bool>,
    verify_created_objects: Option<bool>,
}

impl RegistryConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict_unregistration(mut self, strict: bool) -> Self {
        self.strict_unregistration = Some(strict);
        self
    }
    pub fn verify_created_objects(mut self, verify: bool) -> Self {
        self.verify_created_objects = Some(verify);
        self
    }

    pub fn build(self) -> RegistryConfig {
        let defaults = RegistryConfig::default();
        RegistryConfig {
            strict_unregistration: self
                .strict_unregistration
                .unwrap_or(defaults.strict_unregistration),
            verify_created_objects: self
                .verify_created_objects
                .unwrap_or(defaults.verify_created_objects),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_lenient() {
        let config = RegistryConfig::default();
        assert!(!config.strict_unregistration);
        assert_eq!(config.creation_policy(), CreationPolicy::default());
    }

    #[test]
    fn builder_overrides_only_set_fields() {
        let config = RegistryConfigBuilder::new()
            .strict_unregistration(true)
            .build();
        assert!(config.strict_unregistration);
        assert_eq!(
            config.verify_created_objects,
            RegistryConfig::default().verify_created_objects
        );

        let config = RegistryConfigBuilder::new()
            .verify_created_objects(false)
            .build();
        assert_eq!(config.creation_policy(), CreationPolicy::UNCHECKED);
    }

    #[test]
    fn load_reads_kebab_case_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "strict-unregistration = true").unwrap();
        writeln!(file, "verify-created-objects = true").unwrap();

        let config = RegistryConfig::load(file.path()).unwrap();
        assert_eq!(
            config,
            RegistryConfig {
                strict_unregistration: true,
                verify_created_objects: true,
            }
        );
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = RegistryConfig::from_toml_str("strict-unregistration = true").unwrap();
        assert!(config.strict_unregistration);
        assert_eq!(
            config.verify_created_objects,
            RegistryConfig::default().verify_created_objects
        );
        assert_eq!(
            RegistryConfig::from_toml_str("").unwrap(),
            RegistryConfig::default()
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = RegistryConfig::from_toml_str("strict_unregistration = true");
        assert!(matches!(result, Err(ConfigLoadError::Toml { .. })));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RegistryConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigLoadError::Io { .. })));
    }
}
