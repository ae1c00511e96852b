use std::sync::OnceLock;

use regex::Regex;

static URI_REFERENCE: OnceLock<Regex> = OnceLock::new();
static SCHEME: OnceLock<Regex> = OnceLock::new();

/// Generic URI reference split from RFC 3986 appendix B. Every string
/// without a newline matches; group 3 is the path.
#[allow(clippy::expect_used)]
fn uri_reference() -> &'static Regex {
    URI_REFERENCE.get_or_init(|| {
        Regex::new(r"^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
            .expect("URI reference pattern is valid")
    })
}

#[allow(clippy::expect_used)]
fn scheme() -> &'static Regex {
    SCHEME.get_or_init(|| {
        Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("scheme pattern is valid")
    })
}

/// Scheme of `text`, if it starts like an absolute URI (`scheme:`).
///
/// Plain words and sentences have no scheme, so clipboard text such as
/// `hello world` is not treated as a URI.
pub fn uri_scheme(text: &str) -> Option<&str> {
    scheme()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Path component of a URI, without authority, query or fragment.
pub fn uri_path(uri: &str) -> &str {
    uri_reference()
        .captures(uri)
        .and_then(|caps| caps.get(3))
        .map_or("", |path| path.as_str())
}

/// Lowercased extension (with leading dot) of the last path segment.
///
/// Leading dots of the segment don't start an extension, so `.hidden` has
/// none.
pub fn uri_extension(uri: &str) -> Option<String> {
    let segment = uri_path(uri).rsplit('/').next().unwrap_or_default();
    let stem_start = segment.len() - segment.trim_start_matches('.').len();
    let dot = segment[stem_start..].rfind('.')? + stem_start;

    Some(segment[dot..].to_ascii_lowercase())
}
