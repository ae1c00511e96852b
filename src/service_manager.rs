use std::sync::Arc;

use tokio::time::{self, MissedTickBehavior};
use tokio_stream::wrappers::IntervalStream;
use tracing::{info, instrument};
use zbus::Connection;

use crate::{
    Result,
    config::Config,
    services::{
        clipboard::ClipboardSource,
        media_server::{
            ClipboardContainer, ClipboardPoller, DbusCatalog, MimeResolver, SharedContainer,
            bus_name,
        },
    },
};

/// The running media server: bus connection, served root and well-known name.
///
/// Created once at startup; [`ClipboardMediaService::run`] then polls the
/// clipboard for the lifetime of the process.
pub struct ClipboardMediaService {
    container: SharedContainer,
    catalog: Arc<DbusCatalog>,
    bus_name: String,
    config: Config,
}

impl ClipboardMediaService {
    /// Connects to the session bus, serves the root container and claims
    /// `org.gnome.UPnP.MediaServer2.<app_name>`.
    ///
    /// # Errors
    /// Returns error if the session bus is unreachable, the root can't be
    /// served, or the name is already owned.
    #[instrument(skip_all, fields(app_name = %config.server.app_name))]
    pub async fn start(config: Config) -> Result<Self> {
        let connection = Connection::session().await?;
        let container = ClipboardContainer::new(&config.server.app_name)?.into_shared();
        let catalog = DbusCatalog::serve_root(connection.clone(), container.clone()).await?;

        let bus_name = bus_name(&config.server.app_name);
        connection.request_name(bus_name.as_str()).await?;
        info!(%bus_name, "Media server registered on session bus");

        Ok(Self {
            container,
            catalog: Arc::new(catalog),
            bus_name,
            config,
        })
    }

    /// Well-known bus name owned by this server.
    pub fn bus_name(&self) -> &str {
        &self.bus_name
    }

    /// Shared root container.
    pub fn container(&self) -> &SharedContainer {
        &self.container
    }

    /// Polls `clipboard` at the configured interval, forever.
    ///
    /// # Errors
    /// Returns error if the MIME probe client can't be built.
    pub async fn run(self, clipboard: impl ClipboardSource) -> Result<()> {
        let resolver = MimeResolver::from_config(&self.config.probe)?;

        let mut interval = time::interval(self.config.server.poll_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let poller = ClipboardPoller::new(clipboard, self.container, self.catalog, resolver);
        poller.run(IntervalStream::new(interval)).await;
        Ok(())
    }
}
