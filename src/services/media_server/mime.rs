use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::uri::uri_extension;
use crate::config::ProbeConfig;

/// Extension to MIME type table. Probed content types are only accepted when
/// they appear on the right-hand side.
pub const MIME_TYPES: [(&str, &str); 3] = [
    (".avi", "video/x-msvideo"),
    (".mp4", "video/mp4"),
    (".mkv", "video/x-matroska"),
];

/// Used when neither the extension nor the probe gives a known type.
pub const FALLBACK_MIME_TYPE: &str = "video/x-msvideo";

/// MIME type for the URI's extension, if the extension is in [`MIME_TYPES`].
pub fn mime_for_extension(uri: &str) -> Option<&'static str> {
    let extension = uri_extension(uri)?;
    MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// Matches a `Content-Type` header value against [`MIME_TYPES`], ignoring
/// parameters and case.
pub fn known_mime_type(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    MIME_TYPES
        .iter()
        .find(|(_, mime)| *mime == essence)
        .map(|(_, mime)| *mime)
}

/// Content-type probe failures
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Request could not be built or sent
    #[error("Content-type request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response had no usable `Content-Type` header
    #[error("Response for {0} has no Content-Type")]
    MissingContentType(String),

    /// Probe did not finish in time
    #[error("Content-type probe timed out after {0:?}")]
    Timeout(Duration),
}

/// Asks a remote resource for its declared content type.
#[async_trait]
pub trait ContentTypeProbe: Send + Sync {
    /// Raw `Content-Type` value for `url`.
    ///
    /// # Errors
    /// Returns [`ProbeError`] if the resource can't be reached or declares no
    /// type.
    async fn content_type(&self, url: &str) -> Result<String, ProbeError>;
}

/// Probe that issues a GET and reads only the response headers.
///
/// The declared type is taken whatever the status code; an error page that
/// says `video/mp4` still counts.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    /// Builds a probe whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns [`ProbeError::Request`] if the HTTP client can't be built.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ContentTypeProbe for HttpProbe {
    async fn content_type(&self, url: &str) -> Result<String, ProbeError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            debug!(status = %response.status(), "Probe answered with an error status");
        }

        declared_content_type(response.headers(), url)
    }
}

fn declared_content_type(headers: &HeaderMap, url: &str) -> Result<String, ProbeError> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| ProbeError::MissingContentType(url.to_string()))
}

/// Resolves the MIME type of a URI: extension table first, then a bounded
/// network probe, then [`FALLBACK_MIME_TYPE`].
#[derive(Clone)]
pub struct MimeResolver {
    probe: Option<Arc<dyn ContentTypeProbe>>,
    timeout: Duration,
}

impl MimeResolver {
    /// Resolver that probes with `probe`, bounded by `timeout`.
    pub fn new(probe: Arc<dyn ContentTypeProbe>, timeout: Duration) -> Self {
        Self {
            probe: Some(probe),
            timeout,
        }
    }

    /// Resolver that never touches the network.
    pub fn without_probe() -> Self {
        Self {
            probe: None,
            timeout: Duration::ZERO,
        }
    }

    /// Builds the resolver described by the `[probe]` config section.
    ///
    /// # Errors
    /// Returns [`ProbeError::Request`] if the HTTP client can't be built.
    pub fn from_config(config: &ProbeConfig) -> Result<Self, ProbeError> {
        if !config.enabled {
            return Ok(Self::without_probe());
        }

        let probe = HttpProbe::new(config.timeout())?;
        Ok(Self::new(Arc::new(probe), config.timeout()))
    }

    /// MIME type for `uri`. Never fails; probe problems are logged and give
    /// the fallback type.
    #[instrument(skip(self))]
    pub async fn resolve(&self, uri: &str) -> String {
        if let Some(mime_type) = mime_for_extension(uri) {
            return mime_type.to_string();
        }

        let Some(probe) = &self.probe else {
            return FALLBACK_MIME_TYPE.to_string();
        };

        let probed = tokio::time::timeout(self.timeout, probe.content_type(uri))
            .await
            .unwrap_or_else(|_| Err(ProbeError::Timeout(self.timeout)));

        match probed {
            Ok(content_type) => known_mime_type(&content_type).map_or_else(
                || {
                    debug!(%content_type, "Unrecognised content type, using fallback");
                    FALLBACK_MIME_TYPE.to_string()
                },
                str::to_string,
            ),
            Err(e) => {
                warn!(error = %e, "MIME probe failed, using fallback");
                FALLBACK_MIME_TYPE.to_string()
            }
        }
    }
}
