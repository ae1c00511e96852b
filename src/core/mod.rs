use std::path::Path;

use thiserror::Error;

use crate::services::{
    clipboard::ClipboardError,
    media_server::{MediaServerError, ProbeError},
};

/// Error types for the clipms application.
///
/// This enum covers configuration loading, bus setup and the failures
/// bubbled up from the clipboard and media server services.
#[derive(Error, Debug)]
pub enum ClipmsError {
    /// Configuration field missing or invalid
    #[error("invalid config field '{field}' in [{section}]: {reason}")]
    InvalidConfigField {
        /// The field that is invalid
        field: String,
        /// Config section containing the field
        section: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// I/O operation error with path context
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: std::path::PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Configuration or schema could not be rendered
    #[error("failed to serialize {what}: {details}")]
    Serialization {
        /// What was being serialized
        what: &'static str,
        /// Serializer error details
        details: String,
    },

    /// Session bus connection or name acquisition failed
    #[error("D-Bus setup failed: {0}")]
    Dbus(#[from] zbus::Error),

    /// Clipboard backend could not be opened
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    /// MIME probe client could not be built
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// Media server object model error
    #[error(transparent)]
    MediaServer(#[from] MediaServerError),
}

/// A specialized `Result` type for clipms operations.
pub type Result<T> = std::result::Result<T, ClipmsError>;

impl ClipmsError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        ClipmsError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an invalid field error for the given config section.
    pub fn invalid_field(section: &str, field: &str, reason: impl Into<String>) -> Self {
        ClipmsError::InvalidConfigField {
            field: field.to_string(),
            section: section.to_string(),
            reason: reason.into(),
        }
    }
}
