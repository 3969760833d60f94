/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed bot configuration and the client settings derived from it
[POS]:    Configuration layer - endpoints, timeouts, metadata stamping
[UPDATE]: When adding new configuration options
*/

use std::time::Duration;

use anyhow::{Context, ensure};
use lens_adapter::http::{API_BASE_URL, METADATA_BASE_URL};
use lens_adapter::{ClientConfig, LensClient, MetadataConfig, RetryPolicy};
use serde::{Deserialize, Serialize};

/// Top-level configuration for the Lens bot
///
/// Every field is optional; an empty file yields the public endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BotConfig {
    /// GraphQL endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Metadata storage endpoint
    #[serde(default = "default_metadata_url")]
    pub metadata_url: String,
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Retries for read-only queries; mutations are never retried
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// App id stamped into post metadata
    #[serde(default = "default_app_id")]
    pub app_id: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            metadata_url: default_metadata_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_retries: default_max_retries(),
            app_id: default_app_id(),
            locale: default_locale(),
        }
    }
}

fn default_api_url() -> String {
    API_BASE_URL.to_string()
}

fn default_metadata_url() -> String {
    METADATA_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_app_id() -> String {
    "Lenster".to_string()
}

fn default_locale() -> String {
    "en-US".to_string()
}

impl BotConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("read config file {path}"))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        // serde_yaml reads an empty document as unit, not an empty map
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content).context("parse config yaml")?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.timeout_secs > 0, "timeout_secs must be positive");
        ensure!(
            self.connect_timeout_secs > 0,
            "connect_timeout_secs must be positive"
        );
        ensure!(!self.app_id.trim().is_empty(), "app_id must not be empty");
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            retry: RetryPolicy {
                max_retries: self.max_retries,
                ..defaults.retry
            },
            metadata: MetadataConfig {
                app_id: self.app_id.clone(),
                locale: self.locale.clone(),
                ..defaults.metadata
            },
            ..ClientConfig::default()
        }
    }

    /// Build a client for the configured endpoints
    pub fn client(&self) -> anyhow::Result<LensClient> {
        LensClient::with_config_and_base_urls(self.client_config(), &self.api_url, &self.metadata_url)
            .context("build lens client")
    }
}
