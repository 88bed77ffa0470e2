use crate::cli::Cli;
use crate::error::{CliError, Result};
use curator::{RegistryConfig, RegistryConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Registry settings as written in a config file. Absent keys stay `None` so
/// they can be told apart from explicit values when merging with the CLI.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialRegistryConfig {
    strict_unregistration: Option<bool>,
    verify_created_objects: Option<bool>,
}

impl PartialRegistryConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Command-line flags win over file values; anything set by neither
    /// falls back to the library defaults.
    pub fn merge_with_cli(self, cli: &Cli) -> RegistryConfig {
        let mut builder = RegistryConfigBuilder::new();

        if let Some(strict) = cli.strict.then_some(true).or(self.strict_unregistration) {
            builder = builder.strict_unregistration(strict);
        }

        let verify_flag = if cli.verify_created_objects {
            Some(true)
        } else if cli.no_verify_created_objects {
            Some(false)
        } else {
            None
        };
        if let Some(verify) = verify_flag.or(self.verify_created_objects) {
            builder = builder.verify_created_objects(verify);
        }

        builder.build()
    }
}

/// Resolves the registry configuration for this invocation.
pub fn resolve(cli: &Cli) -> Result<RegistryConfig> {
    let partial = match &cli.config {
        Some(path) => PartialRegistryConfig::from_file(path)?,
        None => PartialRegistryConfig::default(),
    };
    let config = partial.merge_with_cli(cli);
    debug!(
        strict_unregistration = config.strict_unregistration,
        verify_created_objects = config.verify_created_objects,
        "Resolved registry configuration."
    );
    Ok(config)
}
