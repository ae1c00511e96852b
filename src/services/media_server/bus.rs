use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tracing::{debug, instrument, warn};
use zbus::{
    Connection, fdo, interface,
    object_server::{Interface, SignalEmitter},
    zvariant::{OwnedObjectPath, Value},
};

use super::{
    ClipboardMediaItem, FromPropertyValue, MEDIA_CONTAINER_IFACE, MEDIA_ITEM_IFACE,
    MEDIA_OBJECT_IFACE, MediaContainer, MediaObject, MediaServerError, ObjectIdentity,
    PropertyMap, PropertySet, SharedContainer,
};

/// Object registration and change signalling on the bus.
///
/// The poller only talks to the bus through this trait so a tick can be
/// exercised without a session bus.
#[async_trait]
pub trait CatalogBus: Send + Sync {
    /// Serves `item` at its path with the object and item interfaces.
    async fn register_item(&self, item: Arc<ClipboardMediaItem>) -> Result<(), MediaServerError>;

    /// Stops serving whatever is at `path`.
    async fn unregister_item(&self, path: &OwnedObjectPath) -> Result<(), MediaServerError>;

    /// Emits the root container's `Updated` signal.
    async fn emit_updated(&self) -> Result<(), MediaServerError>;
}

/// [`CatalogBus`] backed by a zbus connection's object server.
pub struct DbusCatalog {
    connection: Connection,
    root_path: OwnedObjectPath,
}

impl DbusCatalog {
    /// Serves the root container's object and container interfaces and
    /// returns a catalog for registering its children.
    ///
    /// # Errors
    /// Returns [`MediaServerError::DbusError`] if the root path is already
    /// taken or the object server rejects it.
    #[instrument(skip_all)]
    pub async fn serve_root(
        connection: Connection,
        container: SharedContainer,
    ) -> Result<Self, MediaServerError> {
        let (root_path, identity) = {
            let root = container.read().await;
            (root.path().clone(), root.identity().clone())
        };

        let object_server = connection.object_server();
        object_server
            .at(root_path.as_str(), MediaObjectInterface::new(identity))
            .await?;
        object_server
            .at(root_path.as_str(), MediaContainerInterface::new(container))
            .await?;

        debug!(path = %root_path.as_str(), "Serving root container");
        Ok(Self {
            connection,
            root_path,
        })
    }
}

impl DbusCatalog {
    /// Removes interface `I` at `path`. A missing interface counts as removed.
    async fn remove_interface<I: Interface>(
        &self,
        path: &OwnedObjectPath,
    ) -> Result<(), MediaServerError> {
        match self
            .connection
            .object_server()
            .remove::<I, _>(path.as_str())
            .await
        {
            Ok(_) | Err(zbus::Error::InterfaceNotFound) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl CatalogBus for DbusCatalog {
    async fn register_item(&self, item: Arc<ClipboardMediaItem>) -> Result<(), MediaServerError> {
        let path = item.path().clone();
        let object_server = self.connection.object_server();

        let object_added = object_server
            .at(path.as_str(), MediaObjectInterface::new(item.identity().clone()))
            .await?;
        if !object_added {
            return Err(already_served(&path));
        }

        let item_added = object_server
            .at(path.as_str(), MediaItemInterface::new(item))
            .await;
        if !matches!(item_added, Ok(true)) {
            if let Err(e) = self.remove_interface::<MediaObjectInterface>(&path).await {
                warn!(path = %path.as_str(), error = %e, "Failed to roll back object interface");
            }
            return Err(item_added.map_or_else(Into::into, |_| already_served(&path)));
        }

        debug!(path = %path.as_str(), "Registered item");
        Ok(())
    }

    async fn unregister_item(&self, path: &OwnedObjectPath) -> Result<(), MediaServerError> {
        let item_removed = self.remove_interface::<MediaItemInterface>(path).await;
        let object_removed = self.remove_interface::<MediaObjectInterface>(path).await;
        item_removed.and(object_removed)?;

        debug!(path = %path.as_str(), "Unregistered item");
        Ok(())
    }

    async fn emit_updated(&self) -> Result<(), MediaServerError> {
        let emitter = SignalEmitter::new(&self.connection, self.root_path.as_str())?;
        MediaContainerInterface::updated(&emitter).await?;
        Ok(())
    }
}

fn already_served(path: &OwnedObjectPath) -> MediaServerError {
    MediaServerError::InvalidPath {
        path: path.as_str().to_string(),
        reason: String::from("an interface is already served there"),
    }
}

fn typed_property<T: FromPropertyValue>(
    set: &PropertySet<'_>,
    interface: &str,
    name: &str,
) -> fdo::Result<T> {
    Ok(set.get(interface, name)?.into_typed(name)?)
}

fn to_bus_maps(listing: Vec<PropertyMap>) -> Vec<HashMap<String, Value<'static>>> {
    listing
        .into_iter()
        .map(|properties| {
            properties
                .into_iter()
                .map(|(name, value)| (name, Value::from(value)))
                .collect()
        })
        .collect()
}

/// `org.gnome.UPnP.MediaObject2`, served for the root and for every item.
pub struct MediaObjectInterface {
    identity: ObjectIdentity,
}

impl MediaObjectInterface {
    /// Interface serving `identity`.
    pub fn new(identity: ObjectIdentity) -> Self {
        Self { identity }
    }

    fn properties(&self) -> PropertySet<'_> {
        PropertySet::new().with(&self.identity)
    }
}

#[interface(name = "org.gnome.UPnP.MediaObject2")]
impl MediaObjectInterface {
    #[zbus(property, name = "DisplayName")]
    fn display_name(&self) -> fdo::Result<String> {
        typed_property(&self.properties(), MEDIA_OBJECT_IFACE, "DisplayName")
    }

    #[zbus(property, name = "Parent")]
    fn parent(&self) -> fdo::Result<OwnedObjectPath> {
        typed_property(&self.properties(), MEDIA_OBJECT_IFACE, "Parent")
    }

    #[zbus(property, name = "Type")]
    fn object_type(&self) -> fdo::Result<String> {
        typed_property(&self.properties(), MEDIA_OBJECT_IFACE, "Type")
    }

    #[zbus(property, name = "Path")]
    fn path(&self) -> fdo::Result<OwnedObjectPath> {
        typed_property(&self.properties(), MEDIA_OBJECT_IFACE, "Path")
    }
}

/// `org.gnome.UPnP.MediaContainer2` for the root container.
pub struct MediaContainerInterface {
    container: SharedContainer,
}

impl MediaContainerInterface {
    /// Interface serving the shared root container.
    pub fn new(container: SharedContainer) -> Self {
        Self { container }
    }

    async fn container_property<T: FromPropertyValue>(&self, name: &str) -> fdo::Result<T> {
        let container = self.container.read().await;
        typed_property(&container.property_set(), MEDIA_CONTAINER_IFACE, name)
    }
}

#[interface(name = "org.gnome.UPnP.MediaContainer2")]
impl MediaContainerInterface {
    /// Items followed by containers, `[offset, offset + max_count)`.
    async fn list_children(
        &self,
        offset: u32,
        max_count: u32,
        filter: Vec<String>,
    ) -> Vec<HashMap<String, Value<'static>>> {
        let container = self.container.read().await;
        to_bus_maps(container.list_children(offset, max_count, &filter))
    }

    /// Child containers, `[offset, offset + max_count)`.
    async fn list_containers(
        &self,
        offset: u32,
        max_count: u32,
        filter: Vec<String>,
    ) -> Vec<HashMap<String, Value<'static>>> {
        let container = self.container.read().await;
        to_bus_maps(container.list_containers(offset, max_count, &filter))
    }

    /// Child items, `[offset, offset + max_count)`.
    async fn list_items(
        &self,
        offset: u32,
        max_count: u32,
        filter: Vec<String>,
    ) -> Vec<HashMap<String, Value<'static>>> {
        let container = self.container.read().await;
        to_bus_maps(container.list_items(offset, max_count, &filter))
    }

    #[zbus(property)]
    async fn child_count(&self) -> fdo::Result<u32> {
        self.container_property("ChildCount").await
    }

    #[zbus(property)]
    async fn item_count(&self) -> fdo::Result<u32> {
        self.container_property("ItemCount").await
    }

    #[zbus(property)]
    async fn container_count(&self) -> fdo::Result<u32> {
        self.container_property("ContainerCount").await
    }

    #[zbus(property)]
    async fn searchable(&self) -> fdo::Result<bool> {
        self.container_property("Searchable").await
    }

    /// Children changed.
    #[zbus(signal)]
    async fn updated(emitter: &SignalEmitter<'_>) -> zbus::Result<()>;
}

/// `org.gnome.UPnP.MediaItem2` for one clipboard item.
pub struct MediaItemInterface {
    item: Arc<ClipboardMediaItem>,
}

impl MediaItemInterface {
    /// Interface serving `item`.
    pub fn new(item: Arc<ClipboardMediaItem>) -> Self {
        Self { item }
    }
}

#[interface(name = "org.gnome.UPnP.MediaItem2")]
impl MediaItemInterface {
    #[zbus(property, name = "URLs")]
    fn urls(&self) -> fdo::Result<Vec<String>> {
        typed_property(&self.item.property_set(), MEDIA_ITEM_IFACE, "URLs")
    }

    #[zbus(property, name = "MIMEType")]
    fn mime_type(&self) -> fdo::Result<String> {
        typed_property(&self.item.property_set(), MEDIA_ITEM_IFACE, "MIMEType")
    }
}
