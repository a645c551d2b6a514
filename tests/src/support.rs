//! Shared test fixtures: stub services bound to `::1`.

use std::net::{Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::Router;
use parking_lot::Mutex;
use tokio::net::TcpListener;
use url::Url;

/// One captured delivery: the declared `Host` header and the body.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub host: Option<String>,
    pub body: String,
}

/// How a stub peer answers deliveries.
#[derive(Debug, Clone, Copy)]
pub enum PeerBehavior {
    /// Accept everything with 200.
    Accept,
    /// Answer a fixed non-200 status.
    Reject(u16),
    /// Sleep before answering 200, to trip client timeouts.
    Stall(Duration),
}

#[derive(Clone)]
struct StubState {
    behavior: PeerBehavior,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// A stub peer endpoint that records what it was sent.
pub struct StubPeer {
    pub url: Url,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubPeer {
    /// Everything delivered to this stub so far.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().clone()
    }
}

async fn bind_local() -> (TcpListener, u16) {
    let listener = TcpListener::bind(SocketAddr::from((Ipv6Addr::LOCALHOST, 0)))
        .await
        .expect("bind stub on ::1");
    let port = listener.local_addr().expect("stub local addr").port();
    (listener, port)
}

fn local_url(port: u16) -> Url {
    Url::parse(&format!("http://[::1]:{port}/")).expect("stub url")
}

/// Spawn a stub address-echo service answering `body` (status 200) to every
/// request.
pub async fn spawn_echo_stub(body: &'static str) -> Url {
    let router = Router::new().fallback(move || async move { body });
    let (listener, port) = bind_local().await;
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve echo stub");
    });
    local_url(port)
}

/// Spawn an address-echo stub that always answers `status` with an empty
/// body.
pub async fn spawn_failing_echo_stub(status: u16) -> Url {
    let status = StatusCode::from_u16(status).expect("valid status");
    let router = Router::new().fallback(move || async move { status });
    let (listener, port) = bind_local().await;
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve echo stub");
    });
    local_url(port)
}

/// Spawn an address-echo stub that sleeps `delay` before answering `body`.
pub async fn spawn_stalling_echo_stub(delay: Duration, body: &'static str) -> Url {
    let router = Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        body
    });
    let (listener, port) = bind_local().await;
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve echo stub");
    });
    local_url(port)
}

/// Spawn a stub peer with the given answer behavior.
pub async fn spawn_peer_stub(behavior: PeerBehavior) -> StubPeer {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        behavior,
        captured: Arc::clone(&captured),
    };
    let router = Router::new()
        .fallback(stub_peer_handler)
        .with_state(state);
    let (listener, port) = bind_local().await;
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve peer stub");
    });
    StubPeer {
        url: local_url(port),
        captured,
    }
}

async fn stub_peer_handler(
    State(state): State<StubState>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    state.captured.lock().push(CapturedRequest { host, body });

    match state.behavior {
        PeerBehavior::Accept => StatusCode::OK,
        PeerBehavior::Reject(code) => StatusCode::from_u16(code).expect("valid status"),
        PeerBehavior::Stall(delay) => {
            tokio::time::sleep(delay).await;
            StatusCode::OK
        }
    }
}
