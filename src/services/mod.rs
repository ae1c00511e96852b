/// Desktop clipboard access
pub mod clipboard;
/// MediaServer2 object tree and clipboard poller
pub mod media_server;

pub use clipboard::{ClipboardError, ClipboardSource, SystemClipboard};
pub use media_server::{ClipboardPoller, MediaServerError, PollOutcome};
