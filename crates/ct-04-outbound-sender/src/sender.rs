//! The delivery client.

use reqwest::header::{HeaderValue, HOST};
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::config::SenderConfig;
use crate::error::{HttpClientError, InvalidArgument};
use crate::outcome::DeliveryOutcome;

/// HTTP delivery client for outbound messages.
///
/// Stateless apart from the pooled HTTP client; concurrent sends share
/// nothing mutable, and each is bounded by its own timeout clock.
pub struct OutboundSender {
    client: reqwest::Client,
    config: SenderConfig,
}

impl OutboundSender {
    /// Construct a sender with the given delivery timeout.
    pub fn new(config: SenderConfig) -> Result<Self, HttpClientError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, config })
    }

    /// Deliver `text` to `target` in a single POST attempt.
    ///
    /// `own_address` is the sender's bound address; its authority is
    /// advertised in the `Host` header and is the only sender-identity
    /// channel on the wire. Exactly one attempt, exactly one
    /// [`DeliveryOutcome`].
    pub async fn send(
        &self,
        target: &Url,
        text: &str,
        own_address: &Url,
    ) -> Result<DeliveryOutcome, InvalidArgument> {
        validate_target(target)?;
        if text.trim().is_empty() {
            return Err(InvalidArgument("message text is empty".into()));
        }
        let identity = host_header_value(own_address)?;

        let response = self
            .client
            .post(target.clone())
            .timeout(self.config.timeout)
            .header(HOST, identity)
            .body(text.to_owned())
            .send()
            .await;

        let outcome = match response {
            Ok(resp) if resp.status() == StatusCode::OK => DeliveryOutcome::Delivered,
            Ok(resp) => DeliveryOutcome::Rejected(resp.status().as_u16()),
            // Timeouts are classified before transport failures so a call
            // never reports both.
            Err(e) if e.is_timeout() => DeliveryOutcome::TimedOut,
            Err(e) => {
                debug!(target = %target, error = %e, "delivery transport failure");
                DeliveryOutcome::Unreachable
            }
        };

        debug!(target = %target, %outcome, "delivery attempt finished");
        Ok(outcome)
    }
}

/// The target must be something a peer listener can actually be: an
/// absolute http(s) URL with a host.
fn validate_target(target: &Url) -> Result<(), InvalidArgument> {
    match target.scheme() {
        "http" | "https" => {}
        other => {
            return Err(InvalidArgument(format!(
                "target scheme must be http or https, got {other:?}"
            )))
        }
    }
    if target.host().is_none() {
        return Err(InvalidArgument("target URL has no host".into()));
    }
    Ok(())
}

/// Render `own_address` as a `Host` header value (`host:port`, with IPv6
/// literals bracketed).
fn host_header_value(own_address: &Url) -> Result<HeaderValue, InvalidArgument> {
    let host = match own_address.host() {
        Some(url::Host::Ipv6(ip)) => format!("[{ip}]"),
        Some(url::Host::Ipv4(ip)) => ip.to_string(),
        Some(url::Host::Domain(domain)) => domain.to_string(),
        None => return Err(InvalidArgument("own address has no host".into())),
    };
    let authority = match own_address.port_or_known_default() {
        Some(port) => format!("{host}:{port}"),
        None => host,
    };
    HeaderValue::from_str(&authority)
        .map_err(|_| InvalidArgument(format!("own address {authority:?} is not a valid Host")))
}
