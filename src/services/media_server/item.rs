use super::{MEDIA_ITEM_IFACE, MediaObject, PropertyMap, PropertyProvider, PropertyValue};

/// Supplies the type-specific properties of an item (e.g. `MIMEType`).
pub trait DetailProvider {
    /// Detail properties, merged into the item interface map.
    fn details(&self) -> PropertyMap;
}

/// Item interface properties: `URLs` plus the item's details.
pub struct ItemProperties<'a> {
    urls: &'a [String],
    details: PropertyMap,
}

impl PropertyProvider for ItemProperties<'_> {
    fn interface(&self) -> &'static str {
        MEDIA_ITEM_IFACE
    }

    fn properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::from([(
            String::from("URLs"),
            PropertyValue::StringList(self.urls.to_vec()),
        )]);
        properties.extend(self.details.clone());
        properties
    }
}

/// Item role: source URLs and details on top of [`MediaObject`].
pub trait MediaItem: MediaObject + DetailProvider {
    /// Playable source URLs, preferred first.
    fn urls(&self) -> &[String];

    /// Item interface provider for this item's property set.
    fn item_properties(&self) -> ItemProperties<'_> {
        ItemProperties {
            urls: self.urls(),
            details: self.details(),
        }
    }
}
