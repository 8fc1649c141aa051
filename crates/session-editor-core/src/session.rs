//! Named editing sessions.
//!
//! A [`Session`] owns one buffer, one [`CommandHistory`] and one [`Clipboard`]. Its name is
//! stored as a file name: the user-facing name plus [`SESSION_FILE_SUFFIX`].

use crate::clipboard::Clipboard;
use crate::command::EditRequest;
use crate::error::EngineError;
use crate::history::CommandHistory;

/// Suffix appended to every valid session name.
pub const SESSION_FILE_SUFFIX: &str = ".txt";

/// Characters a session name may not contain.
pub const FORBIDDEN_NAME_CHARS: [char; 9] = ['/', '\\', '"', ':', '?', '*', '|', '<', '>'];

/// Validate a user-facing session name and return its file name.
///
/// Names are stored one per line, so control characters (newlines included) and leading or
/// trailing whitespace are rejected along with [`FORBIDDEN_NAME_CHARS`].
///
/// ```rust
/// use session_editor_core::session::session_file_name;
///
/// assert_eq!(session_file_name("notes").unwrap(), "notes.txt");
/// assert!(session_file_name("a/b").is_err());
/// assert!(session_file_name(" notes").is_err());
/// ```
pub fn session_file_name(name: &str) -> Result<String, EngineError> {
    if name.is_empty()
        || name.trim() != name
        || name.contains(FORBIDDEN_NAME_CHARS)
        || name.contains(char::is_control)
    {
        return Err(EngineError::InvalidSessionName(name.to_string()));
    }
    Ok(format!("{name}{SESSION_FILE_SUFFIX}"))
}

/// One editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    file_name: String,
    history: CommandHistory,
    clipboard: Clipboard,
    text: String,
}

impl Session {
    /// Create an empty session named `name` (without suffix).
    pub fn new(name: &str) -> Result<Self, EngineError> {
        Self::with_text(name, "")
    }

    /// Create a session over existing buffer content.
    ///
    /// Undoing every command later returns the buffer to `text`.
    pub fn with_text(name: &str, text: &str) -> Result<Self, EngineError> {
        Ok(Self {
            file_name: session_file_name(name)?,
            history: CommandHistory::new(),
            clipboard: Clipboard::new(),
            text: text.to_string(),
        })
    }

    /// Reassemble a session from persisted parts.
    ///
    /// `file_name` must carry the suffix; its stem is validated like a fresh name.
    pub fn from_parts(
        file_name: &str,
        history: CommandHistory,
        clipboard: Clipboard,
        text: String,
    ) -> Result<Self, EngineError> {
        let stem = file_name
            .strip_suffix(SESSION_FILE_SUFFIX)
            .ok_or_else(|| EngineError::InvalidSessionName(file_name.to_string()))?;
        Ok(Self {
            file_name: session_file_name(stem)?,
            history,
            clipboard,
            text,
        })
    }

    /// Stored name, suffix included (`notes.txt`).
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Name as the user typed it (`notes`).
    pub fn display_name(&self) -> &str {
        self.file_name
            .strip_suffix(SESSION_FILE_SUFFIX)
            .unwrap_or(&self.file_name)
    }

    /// Current buffer content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Command history.
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Clipboard.
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// History cursor as a signed index (`-1` when nothing is applied).
    pub fn cursor_index(&self) -> isize {
        self.history.cursor_index()
    }

    /// Dispatch a request against this session's buffer and return the new content.
    pub fn dispatch(&mut self, request: EditRequest) -> Result<&str, EngineError> {
        self.text = self
            .history
            .dispatch(request, &self.text, &mut self.clipboard)?;
        Ok(&self.text)
    }
}
