//! A single two-player game and its turn-state machine.
//!
//! State transitions:
//!
//! ```text
//! WaitingForMove(X) --move--> WaitingForMove(O) --move--> WaitingForMove(X) ...
//!                        \                          \
//!                         +--> Terminal(Win | Tie)   +--> Terminal(Win | Tie)
//! ```
//!
//! A session never leaves `Terminal`; the engine destroys it through the
//! [`SessionRegistry`](crate::SessionRegistry) right after the terminal
//! messages have been emitted.

use std::time::Instant;

use crate::board::Board;
use crate::error::MoveRejection;
use crate::messages::{ConnectionId, Envelope, OutputMessage};
use crate::outcome::{self, Outcome};
use crate::symbol::Symbol;

/// Identifier of a session, derived from its two participants.
///
/// Formatted as `"<x-connection>-<o-connection>"`. Stable for the lifetime
/// of the session; not part of the wire protocol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn for_pair(x: ConnectionId, o: ConnectionId) -> Self {
        SessionId(format!("{}-{}", x, o))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A seated connection and the symbol it plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    pub connection: ConnectionId,
    pub symbol: Symbol,
}

/// Where the turn-state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    WaitingForMove(Symbol),
    Terminal(Outcome),
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveApplied {
    /// Symbol that was placed.
    pub symbol: Symbol,

    /// `update` to both participants, then `win`/`tie` if the move ended
    /// the game.
    pub outputs: Vec<Envelope>,

    /// Set when the move put the session into a terminal state.
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    participants: [Participant; 2],
    board: Board,
    state: TurnState,
    started_at: Instant,
}

impl Session {
    /// New session: `x` plays X and moves first, `o` plays O.
    pub fn new(x: ConnectionId, o: ConnectionId) -> Self {
        Session {
            id: SessionId::for_pair(x, o),
            participants: [
                Participant {
                    connection: x,
                    symbol: Symbol::X,
                },
                Participant {
                    connection: o,
                    symbol: Symbol::O,
                },
            ],
            board: Board::new(),
            state: TurnState::WaitingForMove(Symbol::X),
            started_at: Instant::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn participants(&self) -> &[Participant; 2] {
        &self.participants
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Symbol to move next, or `None` once the session is terminal.
    pub fn turn(&self) -> Option<Symbol> {
        match self.state {
            TurnState::WaitingForMove(symbol) => Some(symbol),
            TurnState::Terminal(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, TurnState::Terminal(_))
    }

    pub fn participant(&self, connection: ConnectionId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.connection == connection)
    }

    /// The other seat's connection, if `connection` is seated here.
    pub fn opponent_of(&self, connection: ConnectionId) -> Option<ConnectionId> {
        self.participant(connection)?;
        self.participants
            .iter()
            .map(|p| p.connection)
            .find(|c| *c != connection)
    }

    /// `start` notice for each participant: their symbol, and whether they
    /// move first.
    pub fn start_messages(&self) -> Vec<Envelope> {
        let first = self.turn();
        self.participants
            .iter()
            .map(|p| Envelope::new(p.connection, OutputMessage::start(p.symbol, first == Some(p.symbol))))
            .collect()
    }

    /// Try to place `connection`'s symbol on `index`.
    ///
    /// On any rejection the session is left exactly as it was and no
    /// envelope is produced.
    pub fn apply_move(
        &mut self,
        connection: ConnectionId,
        index: usize,
    ) -> Result<MoveApplied, MoveRejection> {
        let symbol = self
            .participant(connection)
            .map(|p| p.symbol)
            .ok_or(MoveRejection::NotParticipant(connection))?;

        let expected = self.turn().ok_or(MoveRejection::SessionOver)?;
        if expected != symbol {
            return Err(MoveRejection::OutOfTurn {
                attempted: symbol,
                expected,
            });
        }

        match self.board.get(index) {
            None => return Err(MoveRejection::OutOfRange(index)),
            Some(Some(_)) => return Err(MoveRejection::Occupied(index)),
            Some(None) => {}
        }

        self.board.place(index, symbol);
        let next = symbol.other();
        self.state = TurnState::WaitingForMove(next);

        // Board update always goes out before any terminal message.
        let mut outputs: Vec<Envelope> = self
            .participants
            .iter()
            .map(|p| Envelope::new(p.connection, OutputMessage::update(self.board, p.symbol == next)))
            .collect();

        let outcome = outcome::evaluate(&self.board);
        if let Some(result) = outcome {
            let terminal = match result {
                Outcome::Win(winner) => OutputMessage::Win(winner),
                Outcome::Tie => OutputMessage::Tie,
            };
            outputs.extend(
                self.participants
                    .iter()
                    .map(|p| Envelope::new(p.connection, terminal.clone())),
            );
            self.state = TurnState::Terminal(result);
        }

        Ok(MoveApplied {
            symbol,
            outputs,
            outcome,
        })
    }
}
