//! The listener: bind, serve, and the omni-route message handler.

use std::net::{Ipv6Addr, SocketAddr};
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Router;
use ct_02_message_store::MessageStore;
use shared_types::Message;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::EndpointConfig;
use crate::error::EndpointError;

/// Shared state for the request handlers.
#[derive(Clone)]
struct EndpointState {
    store: Arc<MessageStore>,
}

/// The inbound message endpoint.
pub struct InboundEndpoint {
    config: EndpointConfig,
    store: Arc<MessageStore>,
}

impl InboundEndpoint {
    /// Create an endpoint that appends accepted messages to `store`.
    #[must_use]
    pub fn new(config: EndpointConfig, store: Arc<MessageStore>) -> Self {
        Self { config, store }
    }

    /// Bind the listener on `addr` and start serving.
    ///
    /// The returned handle owns the listener task; the caller (normally the
    /// peer session) keeps it for the process lifetime.
    pub async fn bind(&self, addr: Ipv6Addr) -> Result<ListenerHandle, EndpointError> {
        let port = self.config.port;
        let listener = TcpListener::bind(SocketAddr::from((addr, port)))
            .await
            .map_err(|source| EndpointError::Bind { addr, port, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| EndpointError::Bind { addr, port, source })?;

        let state = EndpointState {
            store: Arc::clone(&self.store),
        };
        // A single fallback route: every verb on every path is a message
        // delivery. The body limit is lifted because the protocol caps
        // nothing.
        let router = Router::new()
            .fallback(receive_message)
            .layer(DefaultBodyLimit::disable())
            .with_state(state);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        info!(addr = %local_addr, "inbound endpoint listening");
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = serve.await {
                error!(error = %e, "inbound endpoint server error");
            }
        });

        Ok(ListenerHandle {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        })
    }
}

/// Accept any request as a message delivery.
///
/// `200` on append; `400` for a missing `Host` header, an unreadable or
/// non-UTF-8 body (the `String` extractor rejects those before this runs),
/// or an empty/whitespace-only body. Nothing else is inspected.
async fn receive_message(
    State(state): State<EndpointState>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    let Some(host) = headers.get(header::HOST).and_then(|v| v.to_str().ok()) else {
        debug!("rejected inbound request without Host header");
        return StatusCode::BAD_REQUEST;
    };

    match Message::received(host, body) {
        Ok(message) => {
            let sender = message.sender.clone();
            let total = state.store.append(message);
            debug!(sender = %sender, total, "message received");
            StatusCode::OK
        }
        Err(reason) => {
            debug!(host, error = %reason, "rejected malformed inbound message");
            StatusCode::BAD_REQUEST
        }
    }
}

/// Handle to a bound, serving listener.
///
/// Owned exclusively by the session that started it. Dropping the handle
/// signals shutdown as well, so the listener never outlives its owner.
pub struct ListenerHandle {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ListenerHandle {
    /// The address the listener actually bound, with the real port even
    /// when an ephemeral one was requested.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Gracefully release the listener. Idempotent.
    ///
    /// In-flight requests drain before the task exits, so appends that
    /// already reached the store are never dropped.
    pub async fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!(error = %e, "listener task ended abnormally");
            }
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        // Signal only; the detached task drains in-flight requests and
        // exits on its own.
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
