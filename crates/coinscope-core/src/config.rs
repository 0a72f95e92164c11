//! Scraper configuration.
//!
//! Resolution order used by the CLI: defaults, then an optional JSON file,
//! then `COINSCOPE_*` environment variables, then explicit flags.
//!
//! `timeout_ms` is unset by default, which leaves timing to the transport.
//!
//! ```json
//! {
//!   "listing_url": "https://coinmarketcap.com/",
//!   "detail_base_url": "https://coinmarketcap.com/currencies/",
//!   "timeout_ms": 10000,
//!   "detail": { "price": ".priceValue" }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::locator::{DetailLocators, ListingLocators};

pub const ENV_LISTING_URL: &str = "COINSCOPE_LISTING_URL";
pub const ENV_DETAIL_URL: &str = "COINSCOPE_DETAIL_URL";
pub const ENV_TIMEOUT_MS: &str = "COINSCOPE_TIMEOUT_MS";

pub const DEFAULT_LISTING_URL: &str = "https://coinmarketcap.com/";
pub const DEFAULT_DETAIL_BASE_URL: &str = "https://coinmarketcap.com/currencies/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("environment variable {name} has invalid value '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    #[error("config field '{field}' {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub listing_url: String,
    pub detail_base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    pub listing: ListingLocators,
    pub detail: DetailLocators,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            listing_url: String::from(DEFAULT_LISTING_URL),
            detail_base_url: String::from(DEFAULT_DETAIL_BASE_URL),
            timeout_ms: None,
            listing: ListingLocators::default(),
            detail: DetailLocators::default(),
        }
    }
}

impl ScraperConfig {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Applies overrides from any variable lookup.
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(ENV_LISTING_URL) {
            self.listing_url = url;
        }
        if let Some(url) = lookup(ENV_DETAIL_URL) {
            self.detail_base_url = url;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_MS) {
            let timeout_ms = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_TIMEOUT_MS,
                value: value.clone(),
            })?;
            self.timeout_ms = Some(timeout_ms);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listing_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "listing_url",
                reason: "cannot be empty",
            });
        }
        if self.detail_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "detail_base_url",
                reason: "cannot be empty",
            });
        }
        Ok(())
    }
}
