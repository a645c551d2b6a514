//! Session configuration: one struct composing every subsystem's config.

use ct_01_address_resolver::ResolverConfig;
use ct_03_inbound_endpoint::EndpointConfig;
use ct_04_outbound_sender::SenderConfig;
use serde::{Deserialize, Serialize};

/// Configuration for a whole peer session.
///
/// Every field defaults to the subsystem default (public lookup service,
/// port 40180, 3 s timeouts); callers override only what they need.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Own-address discovery.
    pub resolver: ResolverConfig,
    /// Inbound listener.
    pub endpoint: EndpointConfig,
    /// Outbound deliveries.
    pub sender: SenderConfig,
}

impl SessionConfig {
    /// Validate all subsystem configurations.
    pub fn validate(&self) -> Result<(), String> {
        self.resolver.validate().map_err(|e| e.to_string())?;
        self.sender.validate().map_err(|e| e.to_string())?;
        Ok(())
    }
}
