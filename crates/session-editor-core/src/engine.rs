//! Engine facade.
//!
//! [`Engine`] owns the [`SessionRegistry`] and is the single entry point the UI layer calls.
//! It never touches the filesystem; persisting the returned buffer text and the sessions is
//! left to the caller (see the `session-editor-store` crate).

use crate::clipboard::Clipboard;
use crate::command::EditRequest;
use crate::error::EngineError;
use crate::registry::{SessionId, SessionRegistry};
use crate::session::Session;
use tracing::debug;

/// Session registry plus the operations the UI issues against it.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    registry: SessionRegistry,
}

impl Engine {
    /// Create an engine with no sessions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over a loaded registry.
    pub fn with_registry(registry: SessionRegistry) -> Self {
        Self { registry }
    }

    /// The registry.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Give the registry back, e.g. to persist it on shutdown.
    pub fn into_registry(self) -> SessionRegistry {
        self.registry
    }

    /// Create an empty session.
    pub fn create_session(&mut self, name: &str) -> Result<SessionId, EngineError> {
        self.create_session_with_text(name, "")
    }

    /// Create a session over existing buffer content.
    pub fn create_session_with_text(
        &mut self,
        name: &str,
        text: &str,
    ) -> Result<SessionId, EngineError> {
        let id = self.registry.insert(Session::with_text(name, text)?)?;
        debug!(session = %id, name, "created session");
        Ok(id)
    }

    /// Delete a session and return the file name it freed.
    pub fn delete_session(&mut self, id: SessionId) -> Result<String, EngineError> {
        let session = self
            .registry
            .remove(id)
            .ok_or(EngineError::SessionNotFound(id))?;
        debug!(session = %id, file_name = session.file_name(), "deleted session");
        Ok(session.file_name().to_string())
    }

    /// File names of all sessions, in registry order.
    pub fn list_sessions(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Session by id.
    pub fn session(&self, id: SessionId) -> Result<&Session, EngineError> {
        self.registry.get(id).ok_or(EngineError::SessionNotFound(id))
    }

    /// Dispatch an edit to a session and return the new buffer content.
    pub fn dispatch(&mut self, id: SessionId, request: EditRequest) -> Result<String, EngineError> {
        let session = self
            .registry
            .get_mut(id)
            .ok_or(EngineError::SessionNotFound(id))?;
        session.dispatch(request).map(str::to_string)
    }

    /// Whether the session has a command to undo.
    pub fn can_undo(&self, id: SessionId) -> Result<bool, EngineError> {
        Ok(self.session(id)?.history().can_undo())
    }

    /// Whether the session has a command to redo.
    pub fn can_redo(&self, id: SessionId) -> Result<bool, EngineError> {
        Ok(self.session(id)?.history().can_redo())
    }

    /// Number of redoable commands of the session.
    pub fn forward_count(&self, id: SessionId) -> Result<usize, EngineError> {
        Ok(self.session(id)?.history().forward_count())
    }

    /// The session's clipboard.
    pub fn clipboard(&self, id: SessionId) -> Result<&Clipboard, EngineError> {
        Ok(self.session(id)?.clipboard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_session_is_reported() {
        let mut engine = Engine::new();
        let id = engine.create_session("a").unwrap();
        engine.delete_session(id).unwrap();

        assert_eq!(
            engine.dispatch(id, EditRequest::Undo),
            Err(EngineError::SessionNotFound(id))
        );
        assert_eq!(engine.delete_session(id), Err(EngineError::SessionNotFound(id)));
        assert!(engine.can_undo(id).is_err());
    }

    #[test]
    fn test_create_and_list() {
        let mut engine = Engine::new();
        engine.create_session("b").unwrap();
        engine.create_session("a").unwrap();
        assert_eq!(engine.list_sessions(), ["b.txt", "a.txt"]);
        assert_eq!(
            engine.create_session("a"),
            Err(EngineError::DuplicateSessionName("a".to_string()))
        );
        assert_eq!(
            engine.create_session("x?"),
            Err(EngineError::InvalidSessionName("x?".to_string()))
        );
    }
}
