//! The session state machine and public operations.

use std::net::Ipv6Addr;
use std::sync::Arc;

use ct_01_address_resolver::resolve_own_address;
use ct_02_message_store::{MessageFeed, MessageStore, MessageStream};
use ct_03_inbound_endpoint::{InboundEndpoint, ListenerHandle};
use ct_04_outbound_sender::{DeliveryOutcome, OutboundSender};
use parking_lot::Mutex;
use shared_types::Message;
use tracing::{error, info};
use url::Url;

use crate::config::SessionConfig;
use crate::error::{NotRunning, SendError, SessionError, StartError};

/// Observable session state, for status displays and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    Starting,
    Running,
    Failed,
}

/// Internal state machine. `Running` owns the listener exclusively.
enum SessionState {
    NotStarted,
    Starting,
    Running(Running),
    /// Keeps the triggering error's description for status surfaces; the
    /// error value itself was returned to the `start` caller.
    Failed(String),
}

struct Running {
    bound_address: Url,
    /// `Some` until `shutdown` releases the listener.
    listener: Option<ListenerHandle>,
}

/// One peer's session: resolve own address, run the inbox, send messages.
///
/// Caller-owned (no global state); create as many independent sessions in
/// one process as needed. All methods take `&self`; share via `Arc` across
/// tasks.
pub struct PeerSession {
    config: SessionConfig,
    store: Arc<MessageStore>,
    sender: OutboundSender,
    state: Mutex<SessionState>,
}

impl PeerSession {
    /// Create a session with its own empty message store.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        Self::with_store(config, Arc::new(MessageStore::new()))
    }

    /// Create a session appending into an existing store.
    pub fn with_store(
        config: SessionConfig,
        store: Arc<MessageStore>,
    ) -> Result<Self, SessionError> {
        config.validate().map_err(SessionError::Config)?;
        let sender = OutboundSender::new(config.sender.clone())?;
        Ok(Self {
            config,
            store,
            sender,
            state: Mutex::new(SessionState::NotStarted),
        })
    }

    /// Start the session: discover the node's own IPv6 address, then bind
    /// the inbound endpoint on it.
    ///
    /// Strictly sequential; the bind never happens before the address is
    /// known. Any failure in either step is fatal: the session transitions
    /// to `Failed` and a fresh instance is needed to try again.
    pub async fn start(&self) -> Result<(), StartError> {
        {
            let mut state = self.state.lock();
            match *state {
                SessionState::NotStarted => *state = SessionState::Starting,
                _ => return Err(StartError::AlreadyStarted),
            }
        }

        match self.resolve_and_bind().await {
            Ok(running) => {
                info!(address = %running.bound_address, "peer session running");
                *self.state.lock() = SessionState::Running(running);
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "peer session failed to start");
                *self.state.lock() = SessionState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    async fn resolve_and_bind(&self) -> Result<Running, StartError> {
        let address = resolve_own_address(&self.config.resolver).await?;
        let endpoint = InboundEndpoint::new(self.config.endpoint.clone(), Arc::clone(&self.store));
        let listener = endpoint.bind(address).await?;
        let bound_address = listener_url(address, listener.local_addr().port());
        Ok(Running {
            bound_address,
            listener: Some(listener),
        })
    }

    /// The address peers should send to, e.g. `http://[2001:db8::1]:40180/`.
    ///
    /// Valid only while `Running`.
    pub fn own_address(&self) -> Result<Url, NotRunning> {
        match &*self.state.lock() {
            SessionState::Running(running) => Ok(running.bound_address.clone()),
            _ => Err(NotRunning),
        }
    }

    /// Deliver `text` to a peer's endpoint, one attempt.
    ///
    /// Requires `Running` (the bound address is the advertised sender
    /// identity). The returned [`DeliveryOutcome`] is data for the caller;
    /// no outcome ever changes session state.
    pub async fn send_message(
        &self,
        target: &Url,
        text: &str,
    ) -> Result<DeliveryOutcome, SendError> {
        let own_address = self.own_address()?;
        let outcome = self.sender.send(target, text, &own_address).await?;
        Ok(outcome)
    }

    /// Subscribe to messages appended from now on.
    #[must_use]
    pub fn subscribe(&self) -> MessageFeed {
        self.store.subscribe()
    }

    /// Subscribe as a `Stream`.
    #[must_use]
    pub fn message_stream(&self) -> MessageStream {
        self.store.message_stream()
    }

    /// Point-in-time copy of every message received so far.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.store.snapshot()
    }

    /// The shared store handle, for callers wiring their own consumers.
    #[must_use]
    pub fn store(&self) -> Arc<MessageStore> {
        Arc::clone(&self.store)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        match &*self.state.lock() {
            SessionState::NotStarted => SessionStatus::NotStarted,
            SessionState::Starting => SessionStatus::Starting,
            SessionState::Running(_) => SessionStatus::Running,
            SessionState::Failed(_) => SessionStatus::Failed,
        }
    }

    /// Gracefully release the inbound listener. Idempotent; in-flight
    /// deliveries that already reached the store are never dropped.
    ///
    /// The session does not become startable again; restart means a new
    /// instance.
    pub async fn shutdown(&self) {
        let listener = match &mut *self.state.lock() {
            SessionState::Running(running) => running.listener.take(),
            _ => None,
        };
        if let Some(mut listener) = listener {
            listener.shutdown().await;
            info!("peer session listener released");
        }
    }
}

fn listener_url(address: Ipv6Addr, port: u16) -> Url {
    // A bracketed IPv6 authority always forms a valid URL.
    Url::parse(&format!("http://[{address}]:{port}"))
        .expect("IPv6 authority always forms a valid URL")
}
