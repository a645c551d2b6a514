//! # Outbound Delivery Flow
//!
//! The sender against stub peers under each answer condition, verifying
//! the outcome classification table and the `Host`-header identity
//! channel.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ct_04_outbound_sender::{DeliveryOutcome, OutboundSender, SenderConfig};
    use url::Url;

    use crate::support::{spawn_peer_stub, PeerBehavior};

    fn sender_with_timeout(timeout: Duration) -> OutboundSender {
        OutboundSender::new(SenderConfig { timeout }).expect("client")
    }

    fn own_address() -> Url {
        Url::parse("http://[2001:db8::1]:40180").unwrap()
    }

    #[tokio::test]
    async fn test_accepting_peer_yields_delivered() {
        let peer = spawn_peer_stub(PeerBehavior::Accept).await;
        let sender = sender_with_timeout(Duration::from_secs(1));

        let outcome = sender
            .send(&peer.url, "hello", &own_address())
            .await
            .unwrap();

        assert_eq!(outcome, DeliveryOutcome::Delivered);

        // The receiver learns who sent it from the Host header alone.
        let requests = peer.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, "hello");
        assert_eq!(
            requests[0].host.as_deref(),
            Some("[2001:db8::1]:40180")
        );
    }

    #[tokio::test]
    async fn test_rejecting_peer_yields_rejected_with_status() {
        let peer = spawn_peer_stub(PeerBehavior::Reject(404)).await;
        let sender = sender_with_timeout(Duration::from_secs(1));

        let outcome = sender
            .send(&peer.url, "hello", &own_address())
            .await
            .unwrap();

        assert_eq!(outcome, DeliveryOutcome::Rejected(404));
    }

    #[tokio::test]
    async fn test_slow_peer_yields_timed_out() {
        let peer = spawn_peer_stub(PeerBehavior::Stall(Duration::from_secs(1))).await;
        let sender = sender_with_timeout(Duration::from_millis(100));

        let outcome = sender
            .send(&peer.url, "hello", &own_address())
            .await
            .unwrap();

        assert_eq!(outcome, DeliveryOutcome::TimedOut);
    }

    #[tokio::test]
    async fn test_closed_port_yields_unreachable() {
        let target = Url::parse("http://[::1]:9/").unwrap();
        let sender = sender_with_timeout(Duration::from_secs(1));

        let outcome = sender
            .send(&target, "hello", &own_address())
            .await
            .unwrap();

        assert_eq!(outcome, DeliveryOutcome::Unreachable);
    }

    #[tokio::test]
    async fn test_empty_text_fails_fast_without_reaching_the_peer() {
        let peer = spawn_peer_stub(PeerBehavior::Accept).await;
        let sender = sender_with_timeout(Duration::from_secs(1));

        let err = sender
            .send(&peer.url, "", &own_address())
            .await
            .unwrap_err();

        assert!(err.0.contains("empty"));
        assert!(peer.requests().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_sends_classify_independently() {
        // One stalled delivery must not poison a parallel healthy one.
        let fast = spawn_peer_stub(PeerBehavior::Accept).await;
        let slow = spawn_peer_stub(PeerBehavior::Stall(Duration::from_secs(1))).await;
        let sender = sender_with_timeout(Duration::from_millis(200));

        let own = own_address();
        let (fast_outcome, slow_outcome) = tokio::join!(
            sender.send(&fast.url, "quick", &own),
            sender.send(&slow.url, "stuck", &own),
        );

        assert_eq!(fast_outcome.unwrap(), DeliveryOutcome::Delivered);
        assert_eq!(slow_outcome.unwrap(), DeliveryOutcome::TimedOut);
    }
}
