use std::sync::Arc;

use tokio::sync::RwLock;
use zbus::zvariant::OwnedObjectPath;

use super::{
    ChildProvider, ClipboardMediaItem, MediaContainer, MediaObject, MediaServerError,
    ObjectIdentity, ObjectType, PropertySet, ROOT_PATH_PREFIX, object_path,
};

/// Root container shared between the poller and the bus interfaces.
pub type SharedContainer = Arc<RwLock<ClipboardContainer>>;

/// Root of the catalog: its own parent, holding at most one clipboard item.
#[derive(Debug)]
pub struct ClipboardContainer {
    identity: ObjectIdentity,
    items: Vec<Arc<ClipboardMediaItem>>,
    last_text: Option<String>,
}

impl ClipboardContainer {
    /// Root container for `app_name`, served at
    /// `/org/gnome/UPnP/MediaServer2/<app_name>`.
    ///
    /// # Errors
    /// Returns [`MediaServerError::InvalidPath`] if `app_name` is not a valid
    /// path element.
    pub fn new(app_name: &str) -> Result<Self, MediaServerError> {
        let path = object_path(format!("{ROOT_PATH_PREFIX}/{app_name}"))?;

        Ok(Self {
            identity: ObjectIdentity {
                display_name: app_name.to_string(),
                parent: path.clone(),
                object_type: ObjectType::Container,
                path,
            },
            items: Vec::new(),
            last_text: None,
        })
    }

    /// Wraps the container for sharing with the bus interfaces.
    pub fn into_shared(self) -> SharedContainer {
        Arc::new(RwLock::new(self))
    }

    /// Object path of the root.
    pub fn path(&self) -> &OwnedObjectPath {
        &self.identity.path
    }

    /// Clipboard text seen on the last change, URI or not.
    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }

    /// Current child items.
    pub fn items(&self) -> &[Arc<ClipboardMediaItem>] {
        &self.items
    }

    /// Child item served at `path`, if any.
    pub fn item_at(&self, path: &str) -> Option<&Arc<ClipboardMediaItem>> {
        self.items.iter().find(|item| item.path().as_str() == path)
    }

    pub(crate) fn set_last_text(&mut self, text: String) {
        self.last_text = Some(text);
    }

    pub(crate) fn take_items(&mut self) -> Vec<Arc<ClipboardMediaItem>> {
        std::mem::take(&mut self.items)
    }

    pub(crate) fn push_item(&mut self, item: Arc<ClipboardMediaItem>) {
        self.items.push(item);
    }
}

impl ChildProvider for ClipboardContainer {
    fn children(&self) -> (Vec<&dyn MediaObject>, Vec<&dyn MediaObject>) {
        let items = self
            .items
            .iter()
            .map(|item| item.as_ref() as &dyn MediaObject)
            .collect();
        (items, Vec::new())
    }
}

impl MediaContainer for ClipboardContainer {}

impl MediaObject for ClipboardContainer {
    fn identity(&self) -> &ObjectIdentity {
        &self.identity
    }

    fn property_set(&self) -> PropertySet<'_> {
        PropertySet::new()
            .with(&self.identity)
            .with(self.container_properties())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::media_server::{
        MEDIA_CONTAINER_IFACE, MEDIA_ITEM_IFACE, MEDIA_OBJECT_IFACE, PropertyValue,
    };

    fn container_with_items(count: u32) -> ClipboardContainer {
        let mut container = ClipboardContainer::new("clipboard").unwrap();
        for index in 0..count {
            let item = ClipboardMediaItem::with_mime_type(
                &container.identity,
                format!("http://example.com/{index}.mp4"),
                index,
                String::from("video/mp4"),
            )
            .unwrap();
            container.push_item(Arc::new(item));
        }
        container
    }

    #[test]
    fn root_is_its_own_parent() {
        let container = container_with_items(0);

        assert_eq!(container.path().as_str(), "/org/gnome/UPnP/MediaServer2/clipboard");
        assert_eq!(
            container.get_property(MEDIA_OBJECT_IFACE, "Parent").unwrap(),
            PropertyValue::ObjectPath(container.path().clone())
        );
        assert_eq!(
            container.get_property(MEDIA_OBJECT_IFACE, "DisplayName").unwrap(),
            PropertyValue::String(String::from("clipboard"))
        );
    }

    #[test]
    fn invalid_app_name_is_rejected() {
        assert!(matches!(
            ClipboardContainer::new("clip-board"),
            Err(MediaServerError::InvalidPath { .. })
        ));
    }

    #[test]
    fn child_count_is_item_plus_container_count() {
        for count in 0..4 {
            let container = container_with_items(count);
            let properties = container.get_all_properties(MEDIA_CONTAINER_IFACE);

            assert_eq!(properties["ItemCount"], PropertyValue::UInt32(count));
            assert_eq!(properties["ContainerCount"], PropertyValue::UInt32(0));
            assert_eq!(properties["ChildCount"], PropertyValue::UInt32(count));
            assert_eq!(properties["Searchable"], PropertyValue::Boolean(false));
        }
    }

    #[test]
    fn container_does_not_answer_item_interface() {
        let container = container_with_items(1);
        assert!(container.get_all_properties(MEDIA_ITEM_IFACE).is_empty());
    }

    #[test]
    fn offset_past_end_lists_nothing() {
        let container = container_with_items(2);

        assert!(container.list_children(2, 10, &[]).is_empty());
        assert!(container.list_children(u32::MAX, u32::MAX, &[]).is_empty());
        assert!(container.list_items(5, 1, &[]).is_empty());
    }

    #[test]
    fn listing_takes_half_open_slice() {
        let container = container_with_items(3);

        let listed = container.list_children(1, 1, &[]);
        assert_eq!(listed.len(), 1);
        assert_eq!(
            listed[0]["DisplayName"],
            PropertyValue::String(String::from("Item 1"))
        );

        assert_eq!(container.list_children(1, u32::MAX, &[]).len(), 2);
        assert!(container.list_children(0, 0, &[]).is_empty());
    }

    #[test]
    fn children_listing_is_items_then_containers() {
        let container = container_with_items(3);

        for offset in 0..4 {
            for max_count in 0..4 {
                let mut expected = container.list_items(offset, max_count, &[]);
                let remaining = max_count.saturating_sub(expected.len() as u32);
                let item_total = container.items().len() as u32;
                expected.extend(container.list_containers(
                    offset.saturating_sub(item_total),
                    remaining,
                    &[],
                ));

                assert_eq!(container.list_children(offset, max_count, &[]), expected);
            }
        }
        assert!(container.list_containers(0, 10, &[]).is_empty());
    }

    #[test]
    fn filter_is_accepted_but_not_applied() {
        let container = container_with_items(2);
        let filter = vec![String::from("DisplayName")];

        let listed = container.list_children(0, 10, &filter);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].len(), 6);
    }

    #[test]
    fn item_lookup_by_path() {
        let container = container_with_items(2);

        assert!(container.item_at("/org/gnome/UPnP/MediaServer2/clipboard/1").is_some());
        assert!(container.item_at("/org/gnome/UPnP/MediaServer2/clipboard/2").is_none());
    }
}
