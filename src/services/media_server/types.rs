use std::{collections::BTreeMap, fmt};

use zbus::zvariant::{OwnedObjectPath, Value};

use super::MediaServerError;

/// Interface carrying the identity properties every object exposes.
pub const MEDIA_OBJECT_IFACE: &str = "org.gnome.UPnP.MediaObject2";
/// Interface for objects that hold children.
pub const MEDIA_CONTAINER_IFACE: &str = "org.gnome.UPnP.MediaContainer2";
/// Interface for leaf objects pointing at playable URLs.
pub const MEDIA_ITEM_IFACE: &str = "org.gnome.UPnP.MediaItem2";

/// Prefix of the well-known bus name; the app name is appended.
pub const BUS_NAME_PREFIX: &str = "org.gnome.UPnP.MediaServer2";
/// Prefix of the root object path; the app name is appended.
pub const ROOT_PATH_PREFIX: &str = "/org/gnome/UPnP/MediaServer2";

/// Property name to value, scoped to one interface or merged across several.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// Well-known bus name for an app.
pub fn bus_name(app_name: &str) -> String {
    format!("{BUS_NAME_PREFIX}.{app_name}")
}

/// Parses an object path, keeping the rejected string for error context.
///
/// # Errors
/// Returns [`MediaServerError::InvalidPath`] if `path` is not a valid D-Bus
/// object path.
pub fn object_path(path: String) -> Result<OwnedObjectPath, MediaServerError> {
    OwnedObjectPath::try_from(path.clone()).map_err(|e| MediaServerError::InvalidPath {
        path,
        reason: e.to_string(),
    })
}

/// The `Type` property of a media object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    /// Holds other objects
    Container,
    /// Generic video item
    Video,
    /// Feature-length video item
    VideoMovie,
    /// Generic audio item
    Audio,
    /// Music track
    Music,
    /// Generic image item
    Image,
    /// Photograph
    Photo,
}

impl ObjectType {
    /// Wire representation of the type tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Video => "video",
            Self::VideoMovie => "video.movie",
            Self::Audio => "audio",
            Self::Music => "music",
            Self::Image => "image",
            Self::Photo => "image.photo",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property value, independent of the bus encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// `s`
    String(String),
    /// `o`
    ObjectPath(OwnedObjectPath),
    /// `u`
    UInt32(u32),
    /// `b`
    Boolean(bool),
    /// `as`
    StringList(Vec<String>),
}

impl PropertyValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::ObjectPath(_) => "object path",
            Self::UInt32(_) => "u32",
            Self::Boolean(_) => "bool",
            Self::StringList(_) => "string list",
        }
    }

    /// Unwraps the value as `T`, naming `property` in the mismatch error.
    ///
    /// # Errors
    /// Returns [`MediaServerError::TypeMismatch`] when the value is not a `T`.
    pub fn into_typed<T: FromPropertyValue>(self, property: &str) -> Result<T, MediaServerError> {
        let found = self.kind();
        T::from_property_value(self).ok_or_else(|| MediaServerError::TypeMismatch {
            property: property.to_string(),
            expected: T::KIND,
            found,
        })
    }
}

impl From<PropertyValue> for Value<'static> {
    fn from(value: PropertyValue) -> Self {
        match value {
            PropertyValue::String(s) => Value::from(s),
            PropertyValue::ObjectPath(p) => Value::ObjectPath(p.into_inner()),
            PropertyValue::UInt32(n) => Value::U32(n),
            PropertyValue::Boolean(b) => Value::Bool(b),
            PropertyValue::StringList(list) => Value::from(list),
        }
    }
}

/// Rust types a [`PropertyValue`] can be unwrapped into.
pub trait FromPropertyValue: Sized {
    /// Kind name used in mismatch errors.
    const KIND: &'static str;

    /// Returns `None` when the value holds a different kind.
    fn from_property_value(value: PropertyValue) -> Option<Self>;
}

macro_rules! from_property_value {
    ($ty:ty, $variant:ident, $kind:literal) => {
        impl FromPropertyValue for $ty {
            const KIND: &'static str = $kind;

            fn from_property_value(value: PropertyValue) -> Option<Self> {
                match value {
                    PropertyValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

from_property_value!(String, String, "string");
from_property_value!(OwnedObjectPath, ObjectPath, "object path");
from_property_value!(u32, UInt32, "u32");
from_property_value!(bool, Boolean, "bool");
from_property_value!(Vec<String>, StringList, "string list");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_typed_reports_mismatch() {
        let err = PropertyValue::UInt32(3)
            .into_typed::<String>("DisplayName")
            .unwrap_err();

        assert!(matches!(
            err,
            MediaServerError::TypeMismatch {
                expected: "string",
                found: "u32",
                ..
            }
        ));
    }

    #[test]
    fn object_path_rejects_invalid_segments() {
        assert!(object_path(String::from("/org/gnome/UPnP/MediaServer2/clipboard/0")).is_ok());
        assert!(matches!(
            object_path(String::from("/org/gnome/with space")),
            Err(MediaServerError::InvalidPath { .. })
        ));
    }

    #[test]
    fn bus_values_keep_signature() {
        let list: Value<'static> =
            PropertyValue::StringList(vec![String::from("http://a/b.mp4")]).into();
        assert_eq!(list.value_signature().to_string(), "as");

        let path: Value<'static> = PropertyValue::ObjectPath(
            OwnedObjectPath::try_from("/org/gnome/UPnP/MediaServer2/clipboard").unwrap(),
        )
        .into();
        assert_eq!(path.value_signature().to_string(), "o");
    }
}
