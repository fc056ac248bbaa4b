//! Message types used by the matchmaking engine.
//!
//! These are **transport-agnostic** logical messages:
//! - [`InputMessage`]: what the engine consumes, tagged by the transport
//!   with the [`ConnectionId`] it came from.
//! - [`OutputMessage`]: what the engine produces, wrapped in an
//!   [`Envelope`] naming the connection it must be delivered to.
//!
//! Note: JSON / text encoders live in the `arena-protocol` crate;
//! this module is purely logical.

use crate::board::Board;
use crate::symbol::Symbol;

/// Identifier for a connected client.
///
/// Opaque to the engine; the transport guarantees uniqueness over the
/// lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An event flowing into the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMessage {
    /// Ask to be paired with an opponent.
    Join,

    /// Place the sender's symbol on a cell.
    Move(Move),

    /// Raised by the transport when the link goes away; never sent by clients.
    Disconnect,
}

/// Move request (input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Target cell. Anything outside `0..=8` is ignored by the engine.
    pub index: usize,
}

/// An event emitted by the engine for a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMessage {
    /// A session began.
    Start(Start),

    /// A move was accepted.
    Update(Update),

    /// The game ended with a winner.
    Win(Symbol),

    /// The game ended in a draw.
    Tie,

    /// Informational or terminal notice (e.g. opponent left).
    Status(String),
}

/// Session start notice (output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Start {
    /// Symbol assigned to the recipient.
    pub symbol: Symbol,

    /// Whether the recipient moves first.
    pub turn: bool,
}

/// Post-move board state (output).
///
/// `turn` is computed per recipient, so the two copies of an update sent
/// for one move differ only in that flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Update {
    pub board: Board,
    pub turn: bool,
}

/// An [`OutputMessage`] addressed to one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub to: ConnectionId,
    pub msg: OutputMessage,
}

/// Status text sent to the remaining participant when the other one leaves.
pub const OPPONENT_DISCONNECTED: &str = "Opponent disconnected. Game over.";

// -----------------------------------------------------------------------------
// Convenience constructors
// -----------------------------------------------------------------------------

impl InputMessage {
    pub fn move_to(index: usize) -> Self {
        InputMessage::Move(Move { index })
    }
}

impl OutputMessage {
    pub fn start(symbol: Symbol, turn: bool) -> Self {
        OutputMessage::Start(Start { symbol, turn })
    }

    pub fn update(board: Board, turn: bool) -> Self {
        OutputMessage::Update(Update { board, turn })
    }

    pub fn status(text: impl Into<String>) -> Self {
        OutputMessage::Status(text.into())
    }
}

impl Envelope {
    pub fn new(to: ConnectionId, msg: OutputMessage) -> Self {
        Envelope { to, msg }
    }
}
