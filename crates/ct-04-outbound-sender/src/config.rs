//! Sender configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default round-trip timeout for one delivery attempt.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(3);

/// Configuration errors surfaced by [`SenderConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The send timeout is zero.
    #[error("send timeout cannot be 0")]
    ZeroTimeout,
}

/// Outbound sender configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderConfig {
    /// Timeout applied to the whole request/response round trip of each
    /// send. Also the only cancellation mechanism a send has.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_SEND_TIMEOUT,
        }
    }
}

impl SenderConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
