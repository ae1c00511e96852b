use thiserror::Error;

/// Clipboard access errors
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Clipboard backend could not be opened
    #[error("Failed to open clipboard: {0}")]
    Unavailable(String),

    /// Reading the selection failed for a reason other than missing text
    #[error("Failed to read {selection} selection: {reason}")]
    ReadFailed {
        /// Selection that was being read
        selection: String,
        /// Backend error description
        reason: String,
    },
}
