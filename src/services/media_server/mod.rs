//! Clipboard media server.
//!
//! Serves a MediaServer2 object tree on the session bus: one root container
//! whose only child is an item wrapping the URI most recently copied to the
//! clipboard.
//!
//! ```text
//! /org/gnome/UPnP/MediaServer2/<app>      MediaObject2 + MediaContainer2
//! /org/gnome/UPnP/MediaServer2/<app>/0    MediaObject2 + MediaItem2
//! ```
//!
//! The object model (`object`, `container`, `item`) is bus independent;
//! `bus` adapts it to zbus interfaces and `poller` drives it from the
//! clipboard.

/// zbus interfaces and object registration
pub mod bus;
/// Container role and child listing
pub mod container;
/// Media server error types
pub mod error;
/// Item role
pub mod item;
/// The clipboard URI item
pub mod media_item;
/// MIME type resolution
pub mod mime;
/// Object role and property sets
pub mod object;
/// Clipboard polling loop
pub mod poller;
/// Root container
pub mod server;
/// Interface names, object types and property values
pub mod types;
/// URI scheme and path helpers
pub mod uri;

pub use bus::{
    CatalogBus, DbusCatalog, MediaContainerInterface, MediaItemInterface, MediaObjectInterface,
};
pub use container::{ChildProvider, ContainerProperties, MediaContainer};
pub use error::MediaServerError;
pub use item::{DetailProvider, ItemProperties, MediaItem};
pub use media_item::ClipboardMediaItem;
pub use mime::{
    ContentTypeProbe, FALLBACK_MIME_TYPE, HttpProbe, MIME_TYPES, MimeResolver, ProbeError,
};
pub use object::{MediaObject, ObjectIdentity, PropertyProvider, PropertySet};
pub use poller::{CHILD_INDEX, ClipboardPoller, PollOutcome};
pub use server::{ClipboardContainer, SharedContainer};
pub use types::*;
pub use uri::{uri_extension, uri_scheme};
