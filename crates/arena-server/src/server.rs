//! TCP listener and top-level server wiring.
//!
//! This module:
//! - Listens on the configured address/port.
//! - Accepts new TCP connections.
//! - Assigns each connection a `ConnectionId`.
//! - Spawns:
//!   - a per-client task to handle I/O,
//!   - a single central engine task that owns `MatchmakingEngine`.
//!
//! The actual per-client logic and engine loop live in `client`
//! and `engine_task` modules respectively.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use arena_core::ConnectionId;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn};

use crate::client;
use crate::config::Config;
use crate::engine_task;
use crate::types::{ClientRegistry, EngineRx, EngineTx, OutboundRx, OutboundTx};

/// Process-wide counter for assigning unique `ConnectionId`s.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

fn next_connection_id() -> ConnectionId {
    let id = NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed);
    ConnectionId(id)
}

/// Bind to the configured address and serve forever.
pub async fn run(config: Config) -> Result<()> {
    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    serve(listener, config).await
}

/// Serve on an already-bound listener.
///
/// Only `max_clients` is read from `config`; the bind address is whatever
/// `listener` is bound to.
pub async fn serve(listener: TcpListener, config: Config) -> Result<()> {
    // Shared registry of clients → outbound channels.
    let clients: ClientRegistry = Arc::new(RwLock::new(Default::default()));

    // Channel from clients → engine task.
    let (engine_tx, engine_rx): (EngineTx, EngineRx) = mpsc::unbounded_channel();

    // Spawn the central engine task.
    tokio::spawn(engine_task::run_engine_loop(engine_rx, clients.clone()));

    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let current_clients = clients.read().await.len();

        if current_clients >= config.max_clients {
            warn!(
                "Rejecting connection from {}: max_clients ({}) reached",
                peer_addr, config.max_clients
            );
            // Just drop the stream; client will see the connection closed.
            continue;
        }

        if let Err(e) = stream.set_nodelay(true) {
            warn!("set_nodelay failed for {}: {}", peer_addr, e);
        }

        let connection_id = next_connection_id();
        info!(connection = %connection_id, "Accepted connection from {}", peer_addr);

        // Create outbound channel for this client; the registry holds the
        // only sender, so deregistering closes the writer.
        let (out_tx, out_rx): (OutboundTx, OutboundRx) = mpsc::unbounded_channel();
        clients.write().await.insert(connection_id, out_tx);

        let clients_clone = clients.clone();
        let engine_tx_clone = engine_tx.clone();

        tokio::spawn(async move {
            match client::run_client(connection_id, stream, engine_tx_clone, out_rx, clients_clone).await {
                Ok(()) => info!(connection = %connection_id, "Client disconnected"),
                Err(e) => warn!(connection = %connection_id, "Client error: {:#}", e),
            }
        });
    }
}
