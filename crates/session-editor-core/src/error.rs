use crate::command::CommandKind;
use crate::registry::SessionId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors reported by the engine. None of them leave a session half-mutated.
pub enum EngineError {
    #[error("invalid session name {0:?}")]
    /// The requested session name is empty, padded with whitespace, or contains a forbidden or
    /// control character.
    InvalidSessionName(String),

    #[error("a session named '{0}' already exists")]
    /// Another session in the registry already uses this file name.
    DuplicateSessionName(String),

    #[error("session {0} not found")]
    /// The session id is not (or no longer) part of the registry.
    SessionNotFound(SessionId),

    #[error("there is no operation to undo")]
    /// Undo was requested while the history cursor is before the first command.
    NoOperationToUndo,

    #[error("there is no operation to redo")]
    /// Redo was requested while there are no forward commands.
    NoOperationToRedo,

    #[error("range {start}..={end} is outside the buffer (length {len})")]
    /// A start/end offset falls outside `[0, len - 1]`.
    IndexOutOfRange {
        /// Inclusive start character offset.
        start: usize,
        /// Inclusive end character offset.
        end: usize,
        /// Buffer length in characters.
        len: usize,
    },

    #[error("history cursor {cursor} is outside [-1, {len})")]
    /// A rebuilt history carried a cursor outside `[-1, len - 1]`.
    InvalidHistoryCursor {
        /// The rejected cursor.
        cursor: isize,
        /// Number of recorded commands.
        len: usize,
    },

    #[error("{0} commands are never recorded in history")]
    /// A rebuilt history contained a Copy/Undo/Redo entry.
    UnrecordableCommand(CommandKind),
}
