//! Matchmaking and session lifecycle orchestrator.
//!
//! - Owns the [`WaitingQueue`] and the [`SessionRegistry`].
//! - Pairs connections FIFO as they join.
//! - Routes moves to the mover's session and ends sessions on win, tie
//!   or disconnect.
//!
//! Every handler returns the envelopes to deliver; the engine never talks
//! to a socket. Callers must feed events one at a time.

use tracing::{debug, info};

use crate::error::MoveRejection;
use crate::messages::{ConnectionId, Envelope, InputMessage, Move, OutputMessage, OPPONENT_DISCONNECTED};
use crate::outcome::Outcome;
use crate::queue::WaitingQueue;
use crate::session::Session;
use crate::session_registry::SessionRegistry;

#[derive(Debug, Default)]
pub struct MatchmakingEngine {
    queue: WaitingQueue,
    sessions: SessionRegistry,
}

impl MatchmakingEngine {
    /// Create a new engine with an empty queue and no sessions.
    pub fn new() -> Self {
        MatchmakingEngine::default()
    }

    /// Process a single event from `origin` and return any output envelopes.
    pub fn process_message(&mut self, origin: ConnectionId, msg: InputMessage) -> Vec<Envelope> {
        match msg {
            InputMessage::Join => self.process_join(origin),
            InputMessage::Move(mv) => self.process_move(origin, mv),
            InputMessage::Disconnect => self.process_disconnect(origin),
        }
    }

    // -------------------------------------------------------------------------
    // Internal handlers
    // -------------------------------------------------------------------------

    fn process_join(&mut self, origin: ConnectionId) -> Vec<Envelope> {
        // A connection lives in at most one place: the queue or one session.
        if self.queue.contains(origin) || self.sessions.contains_connection(origin) {
            debug!(connection = %origin, "ignoring duplicate join");
            return Vec::new();
        }

        self.queue.enqueue(origin);
        debug!(connection = %origin, waiting = self.queue.len(), "queued for matchmaking");

        match self.queue.try_pair() {
            Some((x, o)) => {
                let (id, starts) = self.sessions.create(x, o);
                info!(session = %id, x = %x, o = %o, "game started");
                starts
            }
            None => Vec::new(),
        }
    }

    fn process_move(&mut self, origin: ConnectionId, mv: Move) -> Vec<Envelope> {
        match self.try_move(origin, mv.index) {
            Ok(outputs) => outputs,
            Err(rejection) => {
                debug!(connection = %origin, index = mv.index, %rejection, "move ignored");
                Vec::new()
            }
        }
    }

    fn try_move(&mut self, origin: ConnectionId, index: usize) -> Result<Vec<Envelope>, MoveRejection> {
        let session = self
            .sessions
            .find_by_connection_mut(origin)
            .ok_or(MoveRejection::NoSession(origin))?;

        let applied = session.apply_move(origin, index)?;
        debug!(
            session = %session.id(),
            symbol = %applied.symbol,
            index,
            next = ?session.turn(),
            "move applied"
        );

        if let Some(outcome) = applied.outcome {
            let id = session.id().clone();
            if let Some(ended) = self.sessions.destroy(&id) {
                log_game_over(&ended, outcome);
            }
        }

        Ok(applied.outputs)
    }

    fn process_disconnect(&mut self, origin: ConnectionId) -> Vec<Envelope> {
        // Both steps always run; at most one of them finds anything.
        if self.queue.remove(origin) {
            debug!(connection = %origin, "left matchmaking queue");
        }

        let Some(id) = self.sessions.session_id_of(origin).cloned() else {
            return Vec::new();
        };

        let mut outputs = Vec::new();
        if let Some(session) = self.sessions.destroy(&id) {
            if let Some(opponent) = session.opponent_of(origin) {
                outputs.push(Envelope::new(opponent, OutputMessage::status(OPPONENT_DISCONNECTED)));
            }
            info!(session = %id, connection = %origin, "game abandoned by disconnect");
        }

        outputs
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Number of connections waiting for an opponent.
    pub fn waiting_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_waiting(&self, connection: ConnectionId) -> bool {
        self.queue.contains(connection)
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// The live session `connection` is seated in.
    pub fn session_for(&self, connection: ConnectionId) -> Option<&Session> {
        self.sessions.find_by_connection(connection)
    }
}

fn log_game_over(session: &Session, outcome: Outcome) {
    let elapsed_ms = session.started_at().elapsed().as_millis() as u64;
    match outcome {
        Outcome::Win(winner) => {
            info!(session = %session.id(), %winner, elapsed_ms, "game won")
        }
        Outcome::Tie => info!(session = %session.id(), elapsed_ms, "game tied"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    const A: ConnectionId = ConnectionId(1);
    const B: ConnectionId = ConnectionId(2);
    const C: ConnectionId = ConnectionId(3);

    #[test]
    fn first_join_waits_second_join_pairs() {
        let mut engine = MatchmakingEngine::new();
        assert!(engine.process_message(A, InputMessage::Join).is_empty());
        assert!(engine.is_waiting(A));

        let out = engine.process_message(B, InputMessage::Join);
        assert_eq!(
            out,
            vec![
                Envelope::new(A, OutputMessage::start(Symbol::X, true)),
                Envelope::new(B, OutputMessage::start(Symbol::O, false)),
            ]
        );
        assert_eq!(engine.waiting_len(), 0);
        assert_eq!(engine.session_count(), 1);
    }

    #[test]
    fn duplicate_join_is_ignored() {
        let mut engine = MatchmakingEngine::new();
        engine.process_message(A, InputMessage::Join);
        assert!(engine.process_message(A, InputMessage::Join).is_empty());
        assert_eq!(engine.waiting_len(), 1);

        engine.process_message(B, InputMessage::Join);
        assert!(engine.process_message(A, InputMessage::Join).is_empty());
        assert_eq!(engine.waiting_len(), 0);
        assert_eq!(engine.session_count(), 1);
    }

    #[test]
    fn move_without_session_is_ignored() {
        let mut engine = MatchmakingEngine::new();
        assert!(engine.process_message(C, InputMessage::move_to(0)).is_empty());
        engine.process_message(C, InputMessage::Join);
        assert!(engine.process_message(C, InputMessage::move_to(0)).is_empty());
    }

    #[test]
    fn disconnect_while_queued_only_leaves_queue() {
        let mut engine = MatchmakingEngine::new();
        engine.process_message(A, InputMessage::Join);
        assert!(engine.process_message(A, InputMessage::Disconnect).is_empty());
        assert_eq!(engine.waiting_len(), 0);

        // B now waits alone rather than being paired with the departed A.
        assert!(engine.process_message(B, InputMessage::Join).is_empty());
        assert!(engine.is_waiting(B));
    }

    #[test]
    fn disconnect_of_unknown_connection_is_noop() {
        let mut engine = MatchmakingEngine::new();
        assert!(engine.process_message(C, InputMessage::Disconnect).is_empty());
    }

    #[test]
    fn finished_players_can_rejoin() {
        let mut engine = MatchmakingEngine::new();
        engine.process_message(A, InputMessage::Join);
        engine.process_message(B, InputMessage::Join);
        for (who, idx) in [(A, 0), (B, 3), (A, 1), (B, 4), (A, 2)] {
            engine.process_message(who, InputMessage::move_to(idx));
        }
        assert_eq!(engine.session_count(), 0);

        assert!(engine.process_message(B, InputMessage::Join).is_empty());
        let out = engine.process_message(A, InputMessage::Join);
        assert_eq!(out[0], Envelope::new(B, OutputMessage::start(Symbol::X, true)));
        assert_eq!(out[1], Envelope::new(A, OutputMessage::start(Symbol::O, false)));
    }
}
