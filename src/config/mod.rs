//! Configuration schema definitions and validation.
//!
//! Defines the complete configuration structure for clipms. All
//! configurations are serializable to/from TOML format and every field has
//! a default, so an absent config file is not an error.

mod general;
mod loading;
mod paths;
mod probe;
mod server;

#[cfg(test)]
mod tests;

pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use probe::ProbeConfig;
pub use server::{Selection, ServerConfig};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure for clipms.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Media server and clipboard polling settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// MIME type probing settings.
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl Config {
    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
