use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{ClipmsError, Result};

/// Network content-type probing for URIs without a known file extension.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ProbeConfig {
    /// Ask the remote server for the content type. When disabled, unknown
    /// extensions resolve straight to the fallback MIME type.
    pub enabled: bool,

    /// Upper bound for a single probe, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 3000,
        }
    }
}

impl ProbeConfig {
    /// Probe timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Checks the probe timeout.
    ///
    /// # Errors
    /// Returns [`ClipmsError::InvalidConfigField`] for a zero timeout.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(ClipmsError::invalid_field(
                "probe",
                "timeout_ms",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
