mod log_level;

pub use log_level::LogLevel;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// General configuration settings for clipms.
///
/// Contains settings that affect the whole process, such as logging.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Logging level for the application.
    pub log_level: LogLevel,

    /// Also write logs to a daily rotated file under `~/.clipms/logs`.
    pub log_to_file: bool,
}
