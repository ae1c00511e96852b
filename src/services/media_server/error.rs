use thiserror::Error;
use zbus::fdo;

use crate::services::clipboard::ClipboardError;

/// Media server errors
#[derive(Error, Debug)]
pub enum MediaServerError {
    /// Property is not defined on the interface
    #[error("Unknown property {interface}.{property}")]
    UnknownProperty {
        /// Interface that was queried
        interface: String,
        /// Requested property name
        property: String,
    },

    /// Property exists but holds a different value kind than requested
    #[error("Property {property} is {found}, expected {expected}")]
    TypeMismatch {
        /// Property name
        property: String,
        /// Requested value kind
        expected: &'static str,
        /// Actual value kind
        found: &'static str,
    },

    /// Object path could not be built from the app name or index
    #[error("Invalid object path '{path}': {reason}")]
    InvalidPath {
        /// Rejected path
        path: String,
        /// Validation failure
        reason: String,
    },

    /// D-Bus object registration or signal emission failed
    #[error("D-Bus operation failed: {0}")]
    DbusError(#[from] zbus::Error),

    /// Reading the clipboard failed
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl From<MediaServerError> for fdo::Error {
    fn from(error: MediaServerError) -> Self {
        match error {
            MediaServerError::UnknownProperty { .. } => fdo::Error::UnknownProperty(error.to_string()),
            MediaServerError::InvalidPath { .. } => fdo::Error::UnknownObject(error.to_string()),
            MediaServerError::TypeMismatch { .. } => fdo::Error::InvalidArgs(error.to_string()),
            other => fdo::Error::Failed(other.to_string()),
        }
    }
}
