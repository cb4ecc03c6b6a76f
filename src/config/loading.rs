use std::{fs, path::Path};

use tracing::{debug, instrument};

use super::{Config, ConfigPaths};
use crate::{ControllerError, Result};

impl Config {
    /// Load the configuration from its default location.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if the config directory cannot be determined or the file
    /// exists but cannot be read or parsed
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::main_config()?;

        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Load the configuration from a specific file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, is not valid TOML, or holds
    /// an invalid ignore pattern
    #[instrument]
    pub fn load_from(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content).map_err(|e| match e {
            ControllerError::TomlParseError { details, .. } => {
                ControllerError::toml_parse(details, Some(path))
            }
            other => other,
        })?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a configuration document.
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML for this schema or
    /// holds an invalid ignore pattern
    pub fn from_toml(content: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| ControllerError::toml_parse(e, None))?;

        config.players.ignore_patterns()?;
        Ok(config)
    }

    /// JSON schema describing the configuration file.
    ///
    /// # Errors
    /// Returns error if the schema cannot be serialized
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Config);

        serde_json::to_string_pretty(&schema).map_err(|e| ControllerError::ConfigValidation {
            component: "schema".to_string(),
            details: e.to_string(),
        })
    }
}
