//! Central engine loop.
//!
//! This task owns the `MatchmakingEngine` and processes every
//! `EngineRequest` coming from clients, one at a time. That single owner
//! is what serializes joins, moves and disconnects across all sessions.
//!
//! Routing is decided by the engine: each `Envelope` names its recipient.
//! Envelopes for clients that are already gone are dropped.

use std::collections::HashMap;

use arena_core::{ConnectionId, Envelope, MatchmakingEngine};
use tracing::{debug, info};

use crate::types::{ClientRegistry, EngineRequest, EngineRx, OutboundTx};

/// Run the central engine processing loop.
///
/// - `engine_rx`: receives requests from all client tasks.
/// - `clients`: registry of connected clients and their outbound channels.
pub async fn run_engine_loop(mut engine_rx: EngineRx, clients: ClientRegistry) {
    let mut engine = MatchmakingEngine::new();

    while let Some(req) = engine_rx.recv().await {
        let EngineRequest { connection_id, msg } = req;

        let outputs = engine.process_message(connection_id, msg);

        if outputs.is_empty() {
            continue;
        }

        let guard = clients.read().await;
        for env in outputs {
            deliver(env, &guard);
        }
    }

    info!("Engine loop shutting down (engine_rx closed)");
}

/// Hand a single envelope to its recipient's writer, fire-and-forget.
fn deliver(env: Envelope, clients: &HashMap<ConnectionId, OutboundTx>) {
    let Envelope { to, msg } = env;
    match clients.get(&to) {
        Some(tx) => {
            if tx.send(msg).is_err() {
                debug!(connection = %to, "writer already closed, dropping message");
            }
        }
        None => debug!(connection = %to, "recipient gone, dropping message"),
    }
}
