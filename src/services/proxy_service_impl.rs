use async_trait::async_trait;
use reqwest::{Client, header, redirect};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::ProxyConfig;
use crate::services::proxy_service::{ProxiedImage, ProxyError, ProxyService};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
const MAX_REDIRECTS: usize = 10;

/// Scheme and host rules applied to the requested URL and to every redirect hop.
#[derive(Debug, Clone, Default)]
struct UrlPolicy {
    allowed_hosts: Vec<String>,
}

impl UrlPolicy {
    fn new(hosts: &[String]) -> Self {
        Self {
            allowed_hosts: hosts
                .iter()
                .map(|h| h.trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    /// Exact match or any subdomain of an allowed host. An empty list allows all.
    fn host_allowed(&self, host: &str) -> bool {
        if self.allowed_hosts.is_empty() {
            return true;
        }
        let host = host.to_ascii_lowercase();
        self.allowed_hosts.iter().any(|allowed| {
            host == *allowed
                || host
                    .strip_suffix(allowed.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    fn check(&self, url: &Url) -> Result<(), ProxyError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProxyError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        let host = url
            .host_str()
            .ok_or_else(|| ProxyError::InvalidUrl("missing host".to_string()))?;
        if !self.host_allowed(host) {
            return Err(ProxyError::HostNotAllowed(host.to_string()));
        }

        Ok(())
    }
}

pub struct HttpProxyService {
    client: Client,
    policy: UrlPolicy,
}

impl HttpProxyService {
    pub fn new(config: &ProxyConfig) -> Result<Self, ProxyError> {
        let policy = UrlPolicy::new(&config.allowed_hosts);

        let hop_policy = policy.clone();
        let redirects = redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                return attempt.error("too many redirects");
            }
            match hop_policy.check(attempt.url()) {
                Ok(()) => attempt.follow(),
                Err(e) => attempt.error(e),
            }
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("shotify/", env!("CARGO_PKG_VERSION")))
            .redirect(redirects)
            .build()?;

        Ok(Self { client, policy })
    }
}

#[async_trait]
impl ProxyService for HttpProxyService {
    fn validate_url(&self, raw: &str) -> Result<Url, ProxyError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ProxyError::MissingUrl);
        }

        let url = Url::parse(raw).map_err(|e| ProxyError::InvalidUrl(e.to_string()))?;
        self.policy.check(&url)?;
        Ok(url)
    }

    async fn fetch(&self, raw: &str) -> Result<ProxiedImage, ProxyError> {
        let url = self.validate_url(raw)?;
        debug!(url = %url, "Proxying image");

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Upstream image request failed");
            return Err(ProxyError::UpstreamStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        Ok(ProxiedImage::new(content_type, response))
    }
}
