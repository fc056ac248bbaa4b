//! Error types for the core engine.
//!
//! Nothing in the engine is fatal. Illegal moves come back as a
//! [`MoveRejection`] so the caller can log them; the engine never turns
//! one into an outbound message.

use thiserror::Error;

use crate::messages::ConnectionId;
use crate::symbol::Symbol;

/// Why a move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("connection {0} has no active session")]
    NoSession(ConnectionId),

    #[error("connection {0} is not a participant of this session")]
    NotParticipant(ConnectionId),

    #[error("session already ended")]
    SessionOver,

    #[error("not {attempted}'s turn (waiting for {expected})")]
    OutOfTurn { attempted: Symbol, expected: Symbol },

    #[error("cell {0} is out of range")]
    OutOfRange(usize),

    #[error("cell {0} is already occupied")]
    Occupied(usize),
}
