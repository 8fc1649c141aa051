//! Ordered collection of sessions.
//!
//! Sessions keep their creation/load order. Each one gets an opaque [`SessionId`] that stays
//! valid until the session is removed; positional access (first / last / by position) is also
//! available, with later positions shifting down after a removal.

use crate::error::EngineError;
use crate::session::Session;
use std::fmt;

/// Opaque identifier for a session in a [`SessionRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct SessionEntry {
    id: SessionId,
    session: Session,
}

/// All sessions known to the process.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    entries: Vec<SessionEntry>,
    next_id: u64,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a session, rejecting a file name already in use.
    pub fn insert(&mut self, session: Session) -> Result<SessionId, EngineError> {
        if self.contains_name(session.file_name()) {
            return Err(EngineError::DuplicateSessionName(
                session.display_name().to_string(),
            ));
        }
        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.entries.push(SessionEntry { id, session });
        Ok(id)
    }

    /// Remove a session by id.
    pub fn remove(&mut self, id: SessionId) -> Option<Session> {
        let position = self.position_of(id)?;
        Some(self.entries.remove(position).session)
    }

    /// Remove the session at `position`, shifting later sessions down.
    pub fn remove_at(&mut self, position: usize) -> Option<(SessionId, Session)> {
        (position < self.entries.len()).then(|| {
            let entry = self.entries.remove(position);
            (entry.id, entry.session)
        })
    }

    /// Session by id.
    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.session)
    }

    /// Mutable session by id.
    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.session)
    }

    /// Current position of a session.
    pub fn position_of(&self, id: SessionId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Session at `position`.
    pub fn by_position(&self, position: usize) -> Option<(SessionId, &Session)> {
        self.entries
            .get(position)
            .map(|entry| (entry.id, &entry.session))
    }

    /// Earliest session.
    pub fn first(&self) -> Option<(SessionId, &Session)> {
        self.by_position(0)
    }

    /// Latest session.
    pub fn last(&self) -> Option<(SessionId, &Session)> {
        self.entries
            .last()
            .map(|entry| (entry.id, &entry.session))
    }

    /// Id of the session stored under `file_name`.
    pub fn id_for_name(&self, file_name: &str) -> Option<SessionId> {
        self.entries
            .iter()
            .find(|entry| entry.session.file_name() == file_name)
            .map(|entry| entry.id)
    }

    /// Whether a session is stored under `file_name`.
    pub fn contains_name(&self, file_name: &str) -> bool {
        self.id_for_name(file_name).is_some()
    }

    /// File names in registry order.
    pub fn names(&self) -> Vec<String> {
        self.iter()
            .map(|(_, session)| session.file_name().to_string())
            .collect()
    }

    /// Iterate sessions in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (SessionId, &Session)> {
        self.entries.iter().map(|entry| (entry.id, &entry.session))
    }

    /// Number of sessions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no sessions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for SessionRegistry {
    /// Registries are equal when they hold equal sessions in the same order; ids are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((_, a), (_, b))| a == b)
    }
}
