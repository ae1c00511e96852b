use std::sync::Arc;

use futures::{Stream, StreamExt};
use tracing::{debug, info, instrument, warn};
use zbus::zvariant::OwnedObjectPath;

use super::{
    CatalogBus, ClipboardMediaItem, MediaObject, MediaServerError, MimeResolver, SharedContainer,
    uri_scheme,
};
use crate::services::clipboard::ClipboardSource;

/// Index of the single child item under the root.
pub const CHILD_INDEX: u32 = 0;

/// What a single poll did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The clipboard holds no text
    NoText,
    /// Same text as the previous change
    Unchanged,
    /// New text without a URI scheme; remembered, not published
    NotUri,
    /// New URI published as the only child
    Published {
        /// Path of the new child item
        path: OwnedObjectPath,
        /// Resolved MIME type
        mime_type: String,
    },
}

/// Watches the clipboard and republishes the latest URI as the root's only
/// child.
pub struct ClipboardPoller<C> {
    clipboard: C,
    container: SharedContainer,
    bus: Arc<dyn CatalogBus>,
    resolver: MimeResolver,
}

impl<C: ClipboardSource> ClipboardPoller<C> {
    /// Poller publishing into `container` through `bus`.
    pub fn new(
        clipboard: C,
        container: SharedContainer,
        bus: Arc<dyn CatalogBus>,
        resolver: MimeResolver,
    ) -> Self {
        Self {
            clipboard,
            container,
            bus,
            resolver,
        }
    }

    /// Polls once per tick until `ticks` ends.
    ///
    /// A failed poll is logged and does not stop polling; the text is not
    /// remembered, so the next tick retries it.
    pub async fn run<S>(mut self, mut ticks: S)
    where
        S: Stream + Unpin,
    {
        info!("Clipboard polling started");
        while ticks.next().await.is_some() {
            match self.poll_once().await {
                Ok(PollOutcome::Published { path, mime_type }) => {
                    debug!(path = %path.as_str(), %mime_type, "Clipboard item replaced");
                }
                Ok(outcome) => debug!(?outcome, "Clipboard poll"),
                Err(e) => warn!(error = %e, "Clipboard poll failed"),
            }
        }
        info!("Clipboard polling stopped");
    }

    /// Reads the clipboard once and republishes on a new URI.
    ///
    /// # Errors
    /// Returns error if the clipboard can't be read, the new item can't be
    /// built, or registering it on the bus fails. The last seen text is only
    /// updated once the item is registered.
    #[instrument(skip(self))]
    pub async fn poll_once(&mut self) -> Result<PollOutcome, MediaServerError> {
        let Some(text) = self.clipboard.read_text()? else {
            return Ok(PollOutcome::NoText);
        };

        if self.container.read().await.last_text() == Some(text.as_str()) {
            return Ok(PollOutcome::Unchanged);
        }

        let uri = text.trim();
        if uri_scheme(uri).is_none() {
            self.container.write().await.set_last_text(text);
            return Ok(PollOutcome::NotUri);
        }

        info!(%uri, "Got new URI");
        let parent = self.container.read().await.identity().clone();
        let item = Arc::new(
            ClipboardMediaItem::new(&parent, uri.to_string(), CHILD_INDEX, &self.resolver).await?,
        );

        let previous = self.container.write().await.take_items();
        for old in &previous {
            if let Err(e) = self.bus.unregister_item(old.path()).await {
                warn!(path = %old.path().as_str(), error = %e, "Failed to unregister item");
            }
        }

        self.bus.register_item(Arc::clone(&item)).await?;

        {
            let mut container = self.container.write().await;
            container.push_item(Arc::clone(&item));
            container.set_last_text(text);
        }

        if let Err(e) = self.bus.emit_updated().await {
            warn!(error = %e, "Failed to emit Updated");
        }

        Ok(PollOutcome::Published {
            path: item.path().clone(),
            mime_type: item.mime_type().to_string(),
        })
    }
}
