//! FIFO waiting queue for matchmaking.

use std::collections::VecDeque;

use crate::messages::ConnectionId;

/// Connections waiting for an opponent, oldest first.
#[derive(Debug, Default)]
pub struct WaitingQueue {
    waiting: VecDeque<ConnectionId>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        WaitingQueue::default()
    }

    /// Append to the tail.
    ///
    /// Callers are responsible for not enqueuing a connection twice; see
    /// [`MatchmakingEngine`](crate::MatchmakingEngine).
    pub fn enqueue(&mut self, connection: ConnectionId) {
        self.waiting.push_back(connection);
    }

    /// Pop the two oldest entries as `(first, second)`, if there are two.
    ///
    /// Any remainder stays queued for the next attempt.
    pub fn try_pair(&mut self) -> Option<(ConnectionId, ConnectionId)> {
        if self.waiting.len() < 2 {
            return None;
        }
        let first = self.waiting.pop_front()?;
        let second = self.waiting.pop_front()?;
        Some((first, second))
    }

    /// Drop `connection` if it is waiting. Returns whether it was.
    pub fn remove(&mut self, connection: ConnectionId) -> bool {
        let before = self.waiting.len();
        self.waiting.retain(|c| *c != connection);
        self.waiting.len() != before
    }

    pub fn contains(&self, connection: ConnectionId) -> bool {
        self.waiting.contains(&connection)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}
