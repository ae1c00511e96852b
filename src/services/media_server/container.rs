use super::{
    MEDIA_CONTAINER_IFACE, MediaObject, PropertyMap, PropertyProvider, PropertyValue,
};

/// Supplies a container's children.
pub trait ChildProvider {
    /// Child items and child containers, each in listing order.
    fn children(&self) -> (Vec<&dyn MediaObject>, Vec<&dyn MediaObject>);

    /// Whether the container supports search.
    fn searchable(&self) -> bool {
        false
    }
}

/// Container interface properties, computed from the current children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerProperties {
    /// Number of child items
    pub item_count: u32,
    /// Number of child containers
    pub container_count: u32,
    /// Search support
    pub searchable: bool,
}

impl ContainerProperties {
    /// Counts the children of `provider`.
    pub fn of(provider: &(impl ChildProvider + ?Sized)) -> Self {
        let (items, containers) = provider.children();
        Self {
            item_count: count(items.len()),
            container_count: count(containers.len()),
            searchable: provider.searchable(),
        }
    }

    /// Always `item_count + container_count`.
    pub fn child_count(&self) -> u32 {
        self.item_count.saturating_add(self.container_count)
    }
}

impl PropertyProvider for ContainerProperties {
    fn interface(&self) -> &'static str {
        MEDIA_CONTAINER_IFACE
    }

    fn properties(&self) -> PropertyMap {
        PropertyMap::from([
            (
                String::from("ItemCount"),
                PropertyValue::UInt32(self.item_count),
            ),
            (
                String::from("ContainerCount"),
                PropertyValue::UInt32(self.container_count),
            ),
            (
                String::from("ChildCount"),
                PropertyValue::UInt32(self.child_count()),
            ),
            (
                String::from("Searchable"),
                PropertyValue::Boolean(self.searchable),
            ),
        ])
    }
}

/// Container role: child listing on top of [`MediaObject`].
///
/// Listings take the half-open slice `[offset, offset + max_count)` of the
/// relevant children; an offset past the end yields an empty listing. The
/// filter is accepted for interface compatibility but not applied.
pub trait MediaContainer: MediaObject + ChildProvider {
    /// Current container property values.
    fn container_properties(&self) -> ContainerProperties {
        ContainerProperties::of(self)
    }

    /// Items followed by containers.
    fn list_children(&self, offset: u32, max_count: u32, _filter: &[String]) -> Vec<PropertyMap> {
        let (items, containers) = self.children();
        page(items.into_iter().chain(containers), offset, max_count)
    }

    /// Child containers only.
    fn list_containers(&self, offset: u32, max_count: u32, _filter: &[String]) -> Vec<PropertyMap> {
        page(self.children().1, offset, max_count)
    }

    /// Child items only.
    fn list_items(&self, offset: u32, max_count: u32, _filter: &[String]) -> Vec<PropertyMap> {
        page(self.children().0, offset, max_count)
    }
}

fn page<'a>(
    objects: impl IntoIterator<Item = &'a dyn MediaObject>,
    offset: u32,
    max_count: u32,
) -> Vec<PropertyMap> {
    objects
        .into_iter()
        .skip(offset as usize)
        .take(max_count as usize)
        .map(|object| object.all_properties())
        .collect()
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
