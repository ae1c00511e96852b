use arboard::Clipboard;
#[cfg(target_os = "linux")]
use arboard::{GetExtLinux, LinuxClipboardKind};
use tracing::{debug, instrument};

use super::{ClipboardError, ClipboardSource};
use crate::config::Selection;

/// Clipboard backed by the desktop's X11 or Wayland selection via `arboard`.
pub struct SystemClipboard {
    clipboard: Clipboard,
    selection: Selection,
}

impl SystemClipboard {
    /// Opens the desktop clipboard for the given selection.
    ///
    /// The primary selection is only distinct on Linux; elsewhere the regular
    /// clipboard is read.
    ///
    /// # Errors
    /// Returns [`ClipboardError::Unavailable`] if no clipboard backend can be
    /// reached (e.g. no display server).
    #[instrument]
    pub fn open(selection: Selection) -> Result<Self, ClipboardError> {
        let clipboard = Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        debug!("Opened system clipboard");
        Ok(Self {
            clipboard,
            selection,
        })
    }

    #[cfg(target_os = "linux")]
    fn get_text(&mut self) -> Result<String, arboard::Error> {
        let kind = match self.selection {
            Selection::Clipboard => LinuxClipboardKind::Clipboard,
            Selection::Primary => LinuxClipboardKind::Primary,
        };
        self.clipboard.get().clipboard(kind).text()
    }

    #[cfg(not(target_os = "linux"))]
    fn get_text(&mut self) -> Result<String, arboard::Error> {
        self.clipboard.get_text()
    }
}

impl ClipboardSource for SystemClipboard {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        match self.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable | arboard::Error::ConversionFailure) => {
                Ok(None)
            }
            Err(e) => Err(ClipboardError::ReadFailed {
                selection: self.selection.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
