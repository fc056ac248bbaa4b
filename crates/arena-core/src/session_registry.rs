//! Registry of live sessions.
//!
//! Keeps two maps in step:
//! - `SessionId -> Session`
//! - `ConnectionId -> SessionId`, for O(1) lookup of a connection's game.
//!
//! [`SessionRegistry::destroy`] is the only place a session's lifetime ends.

use std::collections::HashMap;

use crate::messages::{ConnectionId, Envelope};
use crate::session::{Session, SessionId};

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
    by_connection: HashMap<ConnectionId, SessionId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        SessionRegistry::default()
    }

    /// Seat `x` and `o` in a fresh session and register it.
    ///
    /// Returns the new id and the `start` notices for both participants.
    pub fn create(&mut self, x: ConnectionId, o: ConnectionId) -> (SessionId, Vec<Envelope>) {
        let session = Session::new(x, o);
        let id = session.id().clone();
        let starts = session.start_messages();

        self.by_connection.insert(x, id.clone());
        self.by_connection.insert(o, id.clone());
        self.sessions.insert(id.clone(), session);

        (id, starts)
    }

    /// Id of the session `connection` is seated in.
    pub fn session_id_of(&self, connection: ConnectionId) -> Option<&SessionId> {
        self.by_connection.get(&connection)
    }

    pub fn find_by_connection(&self, connection: ConnectionId) -> Option<&Session> {
        let id = self.by_connection.get(&connection)?;
        self.sessions.get(id)
    }

    pub fn find_by_connection_mut(&mut self, connection: ConnectionId) -> Option<&mut Session> {
        let id = self.by_connection.get(&connection)?;
        self.sessions.get_mut(id)
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    /// Remove a session and unseat both participants.
    ///
    /// Returns the removed session, or `None` if it was already gone.
    pub fn destroy(&mut self, id: &SessionId) -> Option<Session> {
        let session = self.sessions.remove(id)?;
        for p in session.participants() {
            // Only drop index entries that still point at this session.
            if self.by_connection.get(&p.connection) == Some(id) {
                self.by_connection.remove(&p.connection);
            }
        }
        Some(session)
    }

    pub fn contains_connection(&self, connection: ConnectionId) -> bool {
        self.by_connection.contains_key(&connection)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::OutputMessage;
    use crate::symbol::Symbol;

    #[test]
    fn create_indexes_both_connections() {
        let mut reg = SessionRegistry::new();
        let (id, starts) = reg.create(ConnectionId(1), ConnectionId(2));

        assert_eq!(reg.len(), 1);
        assert_eq!(reg.session_id_of(ConnectionId(1)), Some(&id));
        assert_eq!(reg.session_id_of(ConnectionId(2)), Some(&id));
        assert!(reg.find_by_connection(ConnectionId(3)).is_none());
        assert_eq!(
            starts,
            vec![
                Envelope::new(ConnectionId(1), OutputMessage::start(Symbol::X, true)),
                Envelope::new(ConnectionId(2), OutputMessage::start(Symbol::O, false)),
            ]
        );
    }

    #[test]
    fn destroy_unseats_participants_and_is_idempotent() {
        let mut reg = SessionRegistry::new();
        let (id, _) = reg.create(ConnectionId(1), ConnectionId(2));

        assert!(reg.destroy(&id).is_some());
        assert!(reg.is_empty());
        assert!(!reg.contains_connection(ConnectionId(1)));
        assert!(!reg.contains_connection(ConnectionId(2)));
        assert!(reg.destroy(&id).is_none());
    }

    #[test]
    fn sessions_are_independent() {
        let mut reg = SessionRegistry::new();
        let (a, _) = reg.create(ConnectionId(1), ConnectionId(2));
        let (b, _) = reg.create(ConnectionId(3), ConnectionId(4));
        assert_ne!(a, b);

        reg.destroy(&a);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.session_id_of(ConnectionId(3)), Some(&b));
    }
}
