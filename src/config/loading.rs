use std::{fs, io::ErrorKind, path::Path};

use tracing::{debug, info};

use super::{Config, ConfigPaths};
use crate::{ClipmsError, Result};

impl Config {
    /// Loads the configuration from `path`, or from the default location.
    ///
    /// An explicitly given path must exist. When no path is given and the
    /// default `config.toml` is missing, defaults are used.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, is not valid TOML, or fails
    /// validation.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config = match path {
            Some(path) => Self::load_file(path)?,
            None => {
                let default_path = ConfigPaths::main_config()?;
                match Self::load_file(&default_path) {
                    Err(ClipmsError::IoError { .. }) if !default_path.exists() => {
                        debug!(path = %default_path.display(), "No config file, using defaults");
                        Config::default()
                    }
                    other => other?,
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a configuration from a TOML string.
    ///
    /// # Errors
    /// Returns error if the string is not valid TOML or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| ClipmsError::toml_parse(e, None))?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ClipmsError::Serialization {
            what: "config",
            details: e.to_string(),
        })
    }

    /// Validates every section.
    ///
    /// # Errors
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.probe.validate()
    }

    fn load_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| ClipmsError::IoError {
            path: path.to_path_buf(),
            details: match e.kind() {
                ErrorKind::NotFound => String::from("file not found"),
                _ => e.to_string(),
            },
        })?;

        let config = toml::from_str(&content).map_err(|e| ClipmsError::toml_parse(e, Some(path)))?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}
