//! # Chatra Node Runtime
//!
//! The headless entry point for a Chatra peer.
//!
//! ## Startup Sequence
//!
//! 1. Parse CLI flags (port, lookup endpoint, timeout)
//! 2. Initialize tracing
//! 3. Start the peer session (resolve own IPv6 address, bind the inbox)
//! 4. Print the shareable address
//! 5. Log every received message; read `"<target-url> <text>"` lines from
//!    stdin and deliver them
//!
//! Ctrl-C releases the listener and exits.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use url::Url;

use ct_01_address_resolver::{ResolverConfig, DEFAULT_LOOKUP_ENDPOINT};
use ct_03_inbound_endpoint::{EndpointConfig, DEFAULT_PORT};
use ct_04_outbound_sender::SenderConfig;
use ct_05_peer_session::{PeerSession, SessionConfig};

/// Chatra: serverless IPv6 peer-to-peer text messaging
#[derive(Parser, Debug)]
#[command(name = "node-runtime")]
#[command(about = "Headless Chatra peer: receives messages on an embedded HTTP inbox")]
struct Args {
    /// Listener port (0 = ephemeral)
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address-echo service used to discover this node's own IPv6 address
    #[arg(long, default_value = DEFAULT_LOOKUP_ENDPOINT)]
    lookup_endpoint: Url,

    /// Discovery and delivery timeout (e.g. "3s", "500ms")
    #[arg(long, default_value = "3s", value_parser = humantime::parse_duration)]
    timeout: Duration,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to initialize tracing")?;

    let args = Args::parse();
    let config = SessionConfig {
        resolver: ResolverConfig {
            lookup_endpoint: args.lookup_endpoint,
            timeout: args.timeout,
        },
        endpoint: EndpointConfig { port: args.port },
        sender: SenderConfig {
            timeout: args.timeout,
        },
    };

    let session = Arc::new(PeerSession::new(config).context("invalid session configuration")?);
    session
        .start()
        .await
        .context("failed to start peer session")?;

    let address = session
        .own_address()
        .context("session not running after start")?;
    info!(%address, "ready - share this address with your peers");

    // Mirror every arrival into the log.
    let mut feed = session.subscribe();
    tokio::spawn(async move {
        while let Some(message) = feed.recv().await {
            info!(
                sender = %message.sender,
                received = %message.timestamp.to_rfc3339(),
                "{}", message.text
            );
        }
    });

    run_send_loop(&session).await;

    session.shutdown().await;
    info!("shut down");
    Ok(())
}

/// Read `"<target-url> <text>"` lines from stdin until EOF or Ctrl-C.
async fn run_send_loop(session: &Arc<PeerSession>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received");
                break;
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => handle_command(session, &line).await,
                    Ok(None) => break,
                    Err(e) => {
                        error!(error = %e, "stdin read failed");
                        break;
                    }
                }
            }
        }
    }
}

async fn handle_command(session: &Arc<PeerSession>, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    let Some((target, text)) = line.split_once(' ') else {
        warn!("usage: <target-url> <text>");
        return;
    };
    let target = match Url::parse(target) {
        Ok(url) => url,
        Err(e) => {
            warn!(target, error = %e, "not a valid target URL");
            return;
        }
    };

    match session.send_message(&target, text).await {
        Ok(outcome) if outcome.is_delivered() => info!(target = %target, "delivered"),
        Ok(outcome) => warn!(target = %target, %outcome, "not delivered"),
        Err(e) => warn!(target = %target, error = %e, "send refused"),
    }
}
