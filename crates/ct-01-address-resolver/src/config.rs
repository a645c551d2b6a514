//! Resolver configuration with validation.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default address-echo service.
pub const DEFAULT_LOOKUP_ENDPOINT: &str = "https://api6.my-ip.io/ip";

/// Default whole-request timeout for the lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Configuration errors surfaced by [`ResolverConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The lookup timeout is zero.
    #[error("lookup timeout cannot be 0")]
    ZeroTimeout,

    /// The lookup endpoint is not an http(s) URL.
    #[error("lookup endpoint must be http or https, got {0:?}")]
    UnsupportedScheme(String),
}

/// Address resolver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Address-echo service queried for this node's own IPv6 address.
    pub lookup_endpoint: Url,

    /// Whole-request timeout for the lookup.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            // The literal is a compile-time constant and always parses.
            lookup_endpoint: Url::parse(DEFAULT_LOOKUP_ENDPOINT)
                .expect("default lookup endpoint is a valid URL"),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

impl ResolverConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        match self.lookup_endpoint.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }
}
