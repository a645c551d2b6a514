//! Endpoint configuration.

use serde::{Deserialize, Serialize};

/// Default listener port.
pub const DEFAULT_PORT: u16 = 40180;

/// Inbound endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Listener port. `0` requests an ephemeral port; the bound handle
    /// reports the actual one.
    pub port: u16,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}
