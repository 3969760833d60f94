/*
[INPUT]:  HTTP configuration (base URLs, timeouts, client identification, retry policy)
[OUTPUT]: Configured reqwest client ready for GraphQL calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, ORIGIN, REFERER, USER_AGENT};
use reqwest::{Client, Url};

use crate::graphql::catalog;
use crate::http::{LensError, Result};
use crate::types::AccessToken;

/// Base URLs for the Lens API and metadata storage
pub const API_BASE_URL: &str = "https://api.lens.dev/";
pub const METADATA_BASE_URL: &str = "https://metadata.lenster.xyz/";

/// Header carrying the bearer token
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Bounded retry for idempotent operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Never retry
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Exponential backoff: base, 2*base, 4*base...
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt.min(16)))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(250),
        }
    }
}

/// Fields stamped into uploaded publication metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataConfig {
    pub app_id: String,
    pub locale: String,
    /// Prefix for `external_url` (`<base>/u/<handle>`)
    pub profile_base_url: String,
    /// Gateway prefix turning a storage id into a `contentURI`
    pub content_gateway: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            app_id: "Lenster".to_string(),
            locale: "en-US".to_string(),
            profile_base_url: "https://lenster.xyz".to_string(),
            content_gateway: "https://arweave.net/".to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
    pub origin: String,
    pub referer: String,
    pub retry: RetryPolicy,
    pub metadata: MetadataConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("lens-adapter/", env!("CARGO_PKG_VERSION")).to_string(),
            origin: "https://lenster.xyz".to_string(),
            referer: "https://lenster.xyz/".to_string(),
            retry: RetryPolicy::default(),
            metadata: MetadataConfig::default(),
        }
    }
}

/// Main HTTP client for the Lens API
#[derive(Debug, Clone)]
pub struct LensClient {
    http_client: Client,
    api_url: Url,
    metadata_url: Url,
    config: ClientConfig,
}

impl LensClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_urls(config, API_BASE_URL, METADATA_BASE_URL)
    }

    /// Create a client pointing at explicit endpoints
    pub fn with_config_and_base_urls(
        config: ClientConfig,
        api_url: &str,
        metadata_url: &str,
    ) -> Result<Self> {
        catalog::validate_all()?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_url: Url::parse(api_url)?,
            metadata_url: Url::parse(metadata_url)?,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn metadata_url(&self) -> &Url {
        &self.metadata_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http_client
    }

    /// Base headers plus the bearer header when a token is supplied
    pub fn build_headers(&self, token: Option<&AccessToken>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, header_value(&self.config.user_agent)?);
        headers.insert(ORIGIN, header_value(&self.config.origin)?);
        headers.insert(REFERER, header_value(&self.config.referer)?);

        if let Some(token) = token {
            let mut value = header_value(&token.bearer())?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(ACCESS_TOKEN_HEADER), value);
        }

        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| LensError::Config(format!("invalid header value {value:?}: {e}")))
}
