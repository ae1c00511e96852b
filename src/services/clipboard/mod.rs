//! Desktop clipboard access.
//!
//! The poller only ever needs "the current text, if any", so the backend is
//! hidden behind [`ClipboardSource`] and can be swapped for a scripted source
//! in tests.

mod error;
mod system;

pub use error::ClipboardError;
pub use system::SystemClipboard;

/// Source of clipboard text.
pub trait ClipboardSource {
    /// Reads the current clipboard text.
    ///
    /// Returns `Ok(None)` when the clipboard is empty or holds non-text
    /// content.
    ///
    /// # Errors
    /// Returns [`ClipboardError::ReadFailed`] if the backend fails.
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError>;
}
