//! # End-to-End Messaging
//!
//! Two full peer sessions on `::1`: discovery via a stub address-echo
//! service, inbox bind, delivery, and the observable received-message
//! feed.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ct_01_address_resolver::ResolverConfig;
    use ct_03_inbound_endpoint::EndpointConfig;
    use ct_04_outbound_sender::SenderConfig;
    use ct_05_peer_session::{
        DeliveryOutcome, PeerSession, SessionConfig, SessionStatus, StartError,
    };
    use tokio::time::timeout;
    use url::Url;

    use crate::support::spawn_echo_stub;

    /// A session that discovers itself as `::1` and binds an ephemeral
    /// port, so several can coexist in one test process.
    async fn local_session() -> PeerSession {
        let lookup = spawn_echo_stub("::1").await;
        let config = SessionConfig {
            resolver: ResolverConfig {
                lookup_endpoint: lookup,
                timeout: Duration::from_secs(1),
            },
            endpoint: EndpointConfig { port: 0 },
            sender: SenderConfig {
                timeout: Duration::from_secs(1),
            },
        };
        PeerSession::new(config).expect("session")
    }

    #[tokio::test]
    async fn test_message_crosses_between_two_peers() {
        let peer_a = local_session().await;
        let peer_b = local_session().await;
        peer_a.start().await.expect("start A");
        peer_b.start().await.expect("start B");

        let mut inbox_a = peer_a.subscribe();
        let address_a = peer_a.own_address().expect("A running");
        let address_b = peer_b.own_address().expect("B running");

        let outcome = peer_b
            .send_message(&address_a, "hello")
            .await
            .expect("send");
        assert_eq!(outcome, DeliveryOutcome::Delivered);

        let received = timeout(Duration::from_secs(2), inbox_a.recv())
            .await
            .expect("message before timeout")
            .expect("feed open");

        assert_eq!(received.text, "hello");
        // A knows B only by the address B advertised in its Host header.
        assert_eq!(received.sender, address_b);

        assert_eq!(peer_a.messages().len(), 1);
        assert!(peer_b.messages().is_empty());
    }

    #[tokio::test]
    async fn test_own_address_matches_bound_listener() {
        let session = local_session().await;
        session.start().await.expect("start");

        let address = session.own_address().expect("running");
        assert_eq!(address.host_str(), Some("[::1]"));

        // The advertised address is really the listener: a delivery to it
        // lands in our own store.
        let outcome = session
            .send_message(&address, "note to self")
            .await
            .expect("send");
        assert_eq!(outcome, DeliveryOutcome::Delivered);

        let mut feed = session.subscribe();
        // Already appended by the time Delivered came back; snapshot shows it.
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].text, "note to self");
        assert!(matches!(feed.try_recv(), Ok(None)));
    }

    #[tokio::test]
    async fn test_second_start_fails_without_altering_state() {
        let session = local_session().await;
        session.start().await.expect("first start");
        let address = session.own_address().expect("running");

        let err = session.start().await.unwrap_err();
        assert!(matches!(err, StartError::AlreadyStarted));

        assert_eq!(session.status(), SessionStatus::Running);
        assert_eq!(session.own_address().expect("still running"), address);
    }

    #[tokio::test]
    async fn test_bind_conflict_fails_start_and_is_terminal() {
        let first = local_session().await;
        first.start().await.expect("start first");
        let taken = first.own_address().expect("running");
        let taken_port = taken.port().expect("explicit port");

        // Second session steered onto the occupied port.
        let lookup = spawn_echo_stub("::1").await;
        let config = SessionConfig {
            resolver: ResolverConfig {
                lookup_endpoint: lookup,
                timeout: Duration::from_secs(1),
            },
            endpoint: EndpointConfig { port: taken_port },
            sender: SenderConfig::default(),
        };
        let second = PeerSession::new(config).expect("session");

        let err = second.start().await.unwrap_err();
        assert!(matches!(err, StartError::BindFailed(_)));
        assert_eq!(second.status(), SessionStatus::Failed);
    }

    #[tokio::test]
    async fn test_shutdown_releases_the_inbox() {
        let receiver = local_session().await;
        let sender = local_session().await;
        receiver.start().await.expect("start receiver");
        sender.start().await.expect("start sender");

        let target = receiver.own_address().expect("running");
        assert_eq!(
            sender.send_message(&target, "ping").await.expect("send"),
            DeliveryOutcome::Delivered
        );

        receiver.shutdown().await;
        // Idempotent.
        receiver.shutdown().await;

        let outcome = sender
            .send_message(&target, "into the void")
            .await
            .expect("send");
        assert_eq!(outcome, DeliveryOutcome::Unreachable);
    }
}
