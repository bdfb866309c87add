//! Server-side image fetch for canvases that cannot load cross-origin images.
//!
//! The endpoint is unauthenticated and fetches caller-supplied URLs. Without
//! an allow-list configured it will reach any http(s) host the server can.

use axum::body::Bytes;
use futures::Stream;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("URL parameter is required")]
    MissingUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Host not allowed: {0}")]
    HostNotAllowed(String),

    #[error("Upstream returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("Failed to fetch image: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream(err.to_string())
    }
}

/// An upstream response whose body has not been read yet.
pub struct ProxiedImage {
    pub content_type: String,
    response: reqwest::Response,
}

impl ProxiedImage {
    #[must_use]
    pub fn new(content_type: String, response: reqwest::Response) -> Self {
        Self {
            content_type,
            response,
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static {
        self.response.bytes_stream()
    }
}

#[async_trait::async_trait]
pub trait ProxyService: Send + Sync {
    /// Parses and checks `raw` against the scheme and host rules.
    fn validate_url(&self, raw: &str) -> Result<url::Url, ProxyError>;

    async fn fetch(&self, raw: &str) -> Result<ProxiedImage, ProxyError>;
}
