use zbus::zvariant::OwnedObjectPath;

use super::{MEDIA_OBJECT_IFACE, MediaServerError, ObjectType, PropertyMap, PropertyValue};

/// One interface-scoped source of properties.
///
/// Concrete objects combine several providers into a [`PropertySet`]; two
/// providers may serve the same interface, in which case their maps are
/// merged in order.
pub trait PropertyProvider {
    /// Interface the properties belong to.
    fn interface(&self) -> &'static str;

    /// Current property values.
    fn properties(&self) -> PropertyMap;
}

impl<T: PropertyProvider + ?Sized> PropertyProvider for &T {
    fn interface(&self) -> &'static str {
        (**self).interface()
    }

    fn properties(&self) -> PropertyMap {
        (**self).properties()
    }
}

/// Identity properties shared by every media object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectIdentity {
    /// Human-readable name
    pub display_name: String,
    /// Path of the parent object; the root points at itself
    pub parent: OwnedObjectPath,
    /// Type tag
    pub object_type: ObjectType,
    /// Path this object is served at
    pub path: OwnedObjectPath,
}

impl PropertyProvider for ObjectIdentity {
    fn interface(&self) -> &'static str {
        MEDIA_OBJECT_IFACE
    }

    fn properties(&self) -> PropertyMap {
        PropertyMap::from([
            (
                String::from("DisplayName"),
                PropertyValue::String(self.display_name.clone()),
            ),
            (
                String::from("Parent"),
                PropertyValue::ObjectPath(self.parent.clone()),
            ),
            (
                String::from("Type"),
                PropertyValue::String(self.object_type.to_string()),
            ),
            (
                String::from("Path"),
                PropertyValue::ObjectPath(self.path.clone()),
            ),
        ])
    }
}

/// Ordered list of property providers for one object.
#[derive(Default)]
pub struct PropertySet<'a> {
    providers: Vec<Box<dyn PropertyProvider + 'a>>,
}

impl<'a> PropertySet<'a> {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a provider.
    pub fn with(mut self, provider: impl PropertyProvider + 'a) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Interfaces served, in provider order, without duplicates.
    pub fn interfaces(&self) -> Vec<&'static str> {
        let mut interfaces: Vec<&'static str> = Vec::new();
        for provider in &self.providers {
            let interface = provider.interface();
            if !interfaces.contains(&interface) {
                interfaces.push(interface);
            }
        }
        interfaces
    }

    /// Every property of `interface`; empty if the interface is not served.
    pub fn get_all(&self, interface: &str) -> PropertyMap {
        self.providers
            .iter()
            .filter(|provider| provider.interface() == interface)
            .flat_map(|provider| provider.properties())
            .collect()
    }

    /// One property of `interface`.
    ///
    /// # Errors
    /// Returns [`MediaServerError::UnknownProperty`] if the interface does
    /// not define `name` (or is not served at all).
    pub fn get(&self, interface: &str, name: &str) -> Result<PropertyValue, MediaServerError> {
        self.get_all(interface)
            .remove(name)
            .ok_or_else(|| MediaServerError::UnknownProperty {
                interface: interface.to_string(),
                property: name.to_string(),
            })
    }

    /// Union of all interfaces' properties, as returned in child listings.
    pub fn merged(&self) -> PropertyMap {
        self.providers
            .iter()
            .flat_map(|provider| provider.properties())
            .collect()
    }
}

/// Object role: anything served on the bus with an identity.
pub trait MediaObject {
    /// Identity properties.
    fn identity(&self) -> &ObjectIdentity;

    /// All property providers of this object, identity first.
    fn property_set(&self) -> PropertySet<'_>;

    /// Looks up one property.
    ///
    /// # Errors
    /// Returns [`MediaServerError::UnknownProperty`] for names the interface
    /// does not define.
    fn get_property(&self, interface: &str, name: &str) -> Result<PropertyValue, MediaServerError> {
        self.property_set().get(interface, name)
    }

    /// Every property of one interface; empty for interfaces not implemented.
    fn get_all_properties(&self, interface: &str) -> PropertyMap {
        self.property_set().get_all(interface)
    }

    /// Properties of every implemented interface merged into one map.
    fn all_properties(&self) -> PropertyMap {
        self.property_set().merged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::media_server::MEDIA_ITEM_IFACE;

    fn identity() -> ObjectIdentity {
        let path = OwnedObjectPath::try_from("/org/gnome/UPnP/MediaServer2/test").unwrap();
        ObjectIdentity {
            display_name: String::from("test"),
            parent: path.clone(),
            object_type: ObjectType::Container,
            path,
        }
    }

    struct Extra(&'static str, u32);

    impl PropertyProvider for Extra {
        fn interface(&self) -> &'static str {
            self.0
        }

        fn properties(&self) -> PropertyMap {
            PropertyMap::from([(String::from("Count"), PropertyValue::UInt32(self.1))])
        }
    }

    #[test]
    fn get_answers_from_matching_interface_only() {
        let identity = identity();
        let set = PropertySet::new().with(&identity).with(Extra(MEDIA_ITEM_IFACE, 4));

        assert_eq!(
            set.get(MEDIA_OBJECT_IFACE, "Type").unwrap(),
            PropertyValue::String(String::from("container"))
        );
        assert_eq!(
            set.get(MEDIA_ITEM_IFACE, "Count").unwrap(),
            PropertyValue::UInt32(4)
        );
        assert!(matches!(
            set.get(MEDIA_OBJECT_IFACE, "Count"),
            Err(MediaServerError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn get_all_is_empty_for_unknown_interface() {
        let identity = identity();
        let set = PropertySet::new().with(&identity);

        assert!(set.get_all("org.example.Nope").is_empty());
        assert_eq!(set.get_all(MEDIA_OBJECT_IFACE).len(), 4);
    }

    #[test]
    fn providers_for_same_interface_are_merged() {
        let identity = identity();
        let set = PropertySet::new()
            .with(&identity)
            .with(Extra(MEDIA_OBJECT_IFACE, 1));

        assert_eq!(set.interfaces(), vec![MEDIA_OBJECT_IFACE]);
        assert_eq!(set.get_all(MEDIA_OBJECT_IFACE).len(), 5);
        assert_eq!(set.merged().len(), 5);
    }
}
