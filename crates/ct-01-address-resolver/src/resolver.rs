//! The lookup itself: one GET, parse the body as an IPv6 literal.

use std::net::Ipv6Addr;

use tracing::{debug, info};

use crate::config::ResolverConfig;
use crate::error::{AddressLookupCause, AddressUnavailable};

/// Query the configured address-echo service for this node's IPv6 address.
///
/// Issues exactly one GET with the configured whole-request timeout. The
/// response body, trimmed of surrounding whitespace, must parse as a
/// literal IPv6 address.
pub async fn resolve_own_address(
    config: &ResolverConfig,
) -> Result<Ipv6Addr, AddressUnavailable> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| AddressUnavailable::new(AddressLookupCause::Transport(e)))?;

    debug!(endpoint = %config.lookup_endpoint, "querying address-echo service");

    let response = client
        .get(config.lookup_endpoint.clone())
        .send()
        .await
        .map_err(classify_request_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(AddressUnavailable::new(AddressLookupCause::BadStatus(
            status.as_u16(),
        )));
    }

    let body = response.text().await.map_err(classify_request_error)?;
    let address = parse_ipv6_body(&body).map_err(AddressUnavailable::new)?;

    info!(address = %address, "resolved own IPv6 address");
    Ok(address)
}

/// Map a reqwest failure to a lookup cause. Timeouts are classified first so
/// a call never reports both a timeout and a transport error.
fn classify_request_error(error: reqwest::Error) -> AddressUnavailable {
    let cause = if error.is_timeout() {
        AddressLookupCause::TimedOut
    } else {
        AddressLookupCause::Transport(error)
    };
    AddressUnavailable::new(cause)
}

fn parse_ipv6_body(body: &str) -> Result<Ipv6Addr, AddressLookupCause> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(AddressLookupCause::EmptyBody);
    }
    trimmed
        .parse::<Ipv6Addr>()
        .map_err(|_| AddressLookupCause::NotAnIpv6Literal(trimmed.to_string()))
}
