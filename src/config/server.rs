use std::{fmt, time::Duration};

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{ClipmsError, Result};

/// Which X11/Wayland selection the poller reads from.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, ValueEnum, PartialEq, Eq, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// The regular copy/paste clipboard.
    #[default]
    Clipboard,

    /// The primary selection (middle-click paste). Linux only.
    Primary,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Clipboard => write!(f, "clipboard"),
            Selection::Primary => write!(f, "primary"),
        }
    }
}

/// Media server and clipboard polling settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Application name used in the bus name and root object path.
    ///
    /// Must be a valid D-Bus path element: ASCII letters, digits and `_`.
    pub app_name: String,

    /// Clipboard selection to watch.
    pub selection: Selection,

    /// Interval between clipboard polls, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("clipboard"),
            selection: Selection::Clipboard,
            poll_interval_ms: 1000,
        }
    }
}

impl ServerConfig {
    /// Poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Checks the app name and interval.
    ///
    /// # Errors
    /// Returns [`ClipmsError::InvalidConfigField`] for an empty or non path-safe
    /// app name, or a zero poll interval.
    pub fn validate(&self) -> Result<()> {
        if self.app_name.is_empty() {
            return Err(ClipmsError::invalid_field(
                "server",
                "app_name",
                "must not be empty",
            ));
        }

        if !self
            .app_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ClipmsError::invalid_field(
                "server",
                "app_name",
                format!("'{}' may only contain [A-Za-z0-9_]", self.app_name),
            ));
        }

        if self.poll_interval_ms == 0 {
            return Err(ClipmsError::invalid_field(
                "server",
                "poll_interval_ms",
                "must be greater than zero",
            ));
        }

        Ok(())
    }
}
