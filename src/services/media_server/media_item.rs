use zbus::zvariant::OwnedObjectPath;

use super::{
    DetailProvider, MediaItem, MediaObject, MediaServerError, MimeResolver, ObjectIdentity,
    ObjectType, PropertyMap, PropertySet, PropertyValue, object_path,
};

/// A single URI taken from the clipboard, served as a video item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardMediaItem {
    identity: ObjectIdentity,
    urls: Vec<String>,
    mime_type: String,
}

impl ClipboardMediaItem {
    /// Builds the item at `<parent path>/<index>`, resolving its MIME type.
    ///
    /// Resolution may probe the network (bounded by the resolver's timeout).
    ///
    /// # Errors
    /// Returns [`MediaServerError::InvalidPath`] if the child path is not a
    /// valid object path.
    pub async fn new(
        parent: &ObjectIdentity,
        uri: String,
        index: u32,
        resolver: &MimeResolver,
    ) -> Result<Self, MediaServerError> {
        let mime_type = resolver.resolve(&uri).await;
        Self::with_mime_type(parent, uri, index, mime_type)
    }

    /// Builds the item with an already known MIME type.
    ///
    /// # Errors
    /// Returns [`MediaServerError::InvalidPath`] if the child path is not a
    /// valid object path.
    pub fn with_mime_type(
        parent: &ObjectIdentity,
        uri: String,
        index: u32,
        mime_type: String,
    ) -> Result<Self, MediaServerError> {
        let path = object_path(format!("{}/{index}", parent.path.as_str()))?;

        Ok(Self {
            identity: ObjectIdentity {
                display_name: format!("Item {index}"),
                parent: parent.path.clone(),
                object_type: ObjectType::VideoMovie,
                path,
            },
            urls: vec![uri],
            mime_type,
        })
    }

    /// Object path the item is served at.
    pub fn path(&self) -> &OwnedObjectPath {
        &self.identity.path
    }

    /// Resolved MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

impl DetailProvider for ClipboardMediaItem {
    fn details(&self) -> PropertyMap {
        PropertyMap::from([(
            String::from("MIMEType"),
            PropertyValue::String(self.mime_type.clone()),
        )])
    }
}

impl MediaItem for ClipboardMediaItem {
    fn urls(&self) -> &[String] {
        &self.urls
    }
}

impl MediaObject for ClipboardMediaItem {
    fn identity(&self) -> &ObjectIdentity {
        &self.identity
    }

    fn property_set(&self) -> PropertySet<'_> {
        PropertySet::new()
            .with(&self.identity)
            .with(self.item_properties())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::media_server::{MEDIA_ITEM_IFACE, MEDIA_OBJECT_IFACE};

    fn root() -> ObjectIdentity {
        let path = OwnedObjectPath::try_from("/org/gnome/UPnP/MediaServer2/clipboard").unwrap();
        ObjectIdentity {
            display_name: String::from("clipboard"),
            parent: path.clone(),
            object_type: ObjectType::Container,
            path,
        }
    }

    #[tokio::test]
    async fn new_item_derives_path_name_and_mime_type() {
        let root = root();
        let item = ClipboardMediaItem::new(
            &root,
            String::from("http://example.com/movie.mkv"),
            0,
            &MimeResolver::without_probe(),
        )
        .await
        .unwrap();

        assert_eq!(item.path().as_str(), "/org/gnome/UPnP/MediaServer2/clipboard/0");
        assert_eq!(item.mime_type(), "video/x-matroska");
        assert_eq!(
            item.get_property(MEDIA_OBJECT_IFACE, "DisplayName").unwrap(),
            PropertyValue::String(String::from("Item 0"))
        );
        assert_eq!(
            item.get_property(MEDIA_OBJECT_IFACE, "Parent").unwrap(),
            PropertyValue::ObjectPath(root.path.clone())
        );
        assert_eq!(
            item.get_property(MEDIA_OBJECT_IFACE, "Type").unwrap(),
            PropertyValue::String(String::from("video.movie"))
        );
    }

    #[test]
    fn item_interface_has_urls_and_details() {
        let item = ClipboardMediaItem::with_mime_type(
            &root(),
            String::from("http://example.com/x"),
            3,
            String::from("video/mp4"),
        )
        .unwrap();

        let properties = item.get_all_properties(MEDIA_ITEM_IFACE);
        assert_eq!(properties.len(), 2);
        assert_eq!(
            properties["URLs"],
            PropertyValue::StringList(vec![String::from("http://example.com/x")])
        );
        assert_eq!(
            properties["MIMEType"],
            PropertyValue::String(String::from("video/mp4"))
        );
        assert_eq!(item.all_properties().len(), 6);
    }

    #[test]
    fn unknown_item_property_is_an_error() {
        let item = ClipboardMediaItem::with_mime_type(
            &root(),
            String::from("http://example.com/x"),
            0,
            String::from("video/mp4"),
        )
        .unwrap();

        assert!(matches!(
            item.get_property(MEDIA_ITEM_IFACE, "Artist"),
            Err(MediaServerError::UnknownProperty { .. })
        ));
    }
}
