//! Shared types for the arena TCP server.
//!
//! This module defines:
//! - channel aliases between clients and the engine loop
//! - `ClientRegistry`: who is connected and how to reach them
//! - `EngineRequest`: events flowing from clients to the engine

use std::collections::HashMap;
use std::sync::Arc;

use arena_core::{ConnectionId, InputMessage, OutputMessage};
use tokio::sync::mpsc;
use tokio::sync::RwLock;

/// Outbound messages from the engine to a given client.
pub type OutboundTx = mpsc::UnboundedSender<OutputMessage>;
pub type OutboundRx = mpsc::UnboundedReceiver<OutputMessage>;

/// Registry of connected clients and their outbound channels.
///
/// - Key: `ConnectionId`
/// - Value: `OutboundTx` to send `OutputMessage`s to that client.
pub type ClientRegistry = Arc<RwLock<HashMap<ConnectionId, OutboundTx>>>;

/// Event flowing from a client task into the central engine task.
#[derive(Debug)]
pub struct EngineRequest {
    pub connection_id: ConnectionId,
    pub msg: InputMessage,
}

/// Channel from clients → engine task.
pub type EngineTx = mpsc::UnboundedSender<EngineRequest>;
pub type EngineRx = mpsc::UnboundedReceiver<EngineRequest>;
