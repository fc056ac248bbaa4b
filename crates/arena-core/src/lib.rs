//! arena-core
//!
//! Pure tic-tac-toe matchmaking logic:
//! - messages (input/output types, addressed envelopes)
//! - board and outcome evaluation
//! - FIFO waiting queue
//! - per-session turn-state machine
//! - session registry and the engine facade that ties them together

pub mod symbol;
pub mod board;
pub mod outcome;
pub mod messages;
pub mod queue;
pub mod session;
pub mod session_registry;
pub mod matchmaking_engine;
pub mod error;

pub use symbol::Symbol;
pub use board::{Board, Cell, BOARD_CELLS};
pub use outcome::{check_win, evaluate, is_tie, Outcome};

pub use messages::{
    ConnectionId,
    Envelope,
    InputMessage,
    Move,
    OutputMessage,
    Start,
    Update,
    OPPONENT_DISCONNECTED,
};

pub use queue::WaitingQueue;
pub use session::{MoveApplied, Participant, Session, SessionId, TurnState};
pub use session_registry::SessionRegistry;
pub use matchmaking_engine::MatchmakingEngine;
pub use error::MoveRejection;
