//! arena-protocol
//!
//! Wire-level encoding/decoding for the tic-tac-toe arena.
//!
//! This crate turns logical engine messages
//! (`arena_core::InputMessage` / `OutputMessage`) into text lines and
//! back again.
//!
//! - [`json_codec`] : JSON lines (the primary client protocol)
//! - [`csv_codec`]  : terse text lines (for netcat / scripted scenarios)

pub mod wire_types;
pub mod json_codec;
pub mod csv_codec;

use thiserror::Error;

pub use json_codec::{decode_input, decode_output, encode_input, encode_output};

/// Errors that can arise when encoding/decoding a line.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Malformed JSON, unknown event, or a payload of the wrong shape.
    #[error("invalid JSON message: {0}")]
    Json(#[from] serde_json::Error),

    /// The message exists only inside the server.
    #[error("`{0}` has no wire representation")]
    NotOnWire(&'static str),
}
