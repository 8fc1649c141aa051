//! Linear command history and the dispatch state machine.
//!
//! The history is an ordered sequence of recorded commands plus a cursor marking the last
//! applied one. The cursor ranges over `{-1} ∪ [0, len - 1]`; it is stored as `Option<usize>`
//! with `None` standing for -1 ("before the first command").
//!
//! Dispatching a new Paste/Cut/Delete after some undos discards every forward command first,
//! so the history never branches.

use crate::clipboard::Clipboard;
use crate::command::{Command, CommandKind, EditRequest};
use crate::error::EngineError;
use crate::text::char_len;
use tracing::debug;

/// Recorded commands of one session plus the undo/redo cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandHistory {
    commands: Vec<Command>,
    cursor: Option<usize>,
}

impl CommandHistory {
    /// Create an empty history (cursor = -1).
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a history from decoded commands.
    ///
    /// `previous` back-references are rebound so each command points at the one before it.
    /// Only Paste/Cut/Delete may appear, each range must fit the snapshot it was taken on, and
    /// `cursor` must lie in `[-1, len - 1]`.
    pub fn from_commands(mut commands: Vec<Command>, cursor: isize) -> Result<Self, EngineError> {
        for (index, command) in commands.iter_mut().enumerate() {
            let kind = command.kind();
            let state = command
                .state_mut()
                .filter(|_| kind.is_recorded())
                .ok_or(EngineError::UnrecordableCommand(kind))?;
            let len = char_len(&state.snapshot);
            match kind {
                CommandKind::Paste => state.range.check_paste_within(len)?,
                _ => state.range.check_within(len)?,
            }
            state.previous = index.checked_sub(1);
        }

        let len = commands.len();
        let cursor = match cursor {
            -1 => None,
            c if c >= 0 && (c as usize) < len => Some(c as usize),
            c => return Err(EngineError::InvalidHistoryCursor { cursor: c, len }),
        };

        Ok(Self { commands, cursor })
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was ever recorded (or everything was truncated).
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Recorded command at `index`.
    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    /// All recorded commands, oldest first.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Iterate recorded commands, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Index of the last applied command, `None` when nothing is applied.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The cursor as a signed index, `-1` when nothing is applied.
    pub fn cursor_index(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    /// Commands after the cursor that Redo can still reapply.
    pub fn forward_count(&self) -> usize {
        self.commands.len() - self.applied_count()
    }

    /// Whether Undo has a command to reverse.
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    /// Whether Redo has a command to reapply.
    pub fn can_redo(&self) -> bool {
        self.forward_count() > 0
    }

    /// Buffer content implied by the history alone.
    ///
    /// This is the post-state of the command at the cursor; with nothing applied it is the
    /// snapshot the first command ran on (empty for a fresh history).
    pub fn replayed_text(&self) -> String {
        match self.cursor {
            Some(index) => self.commands[index].post_state(),
            None => self
                .commands
                .first()
                .map(|first| first.undo())
                .unwrap_or_default(),
        }
    }

    /// Dispatch one request against `buffer` and return the resulting buffer content.
    ///
    /// Failed dispatches leave the history, the clipboard, and the caller's buffer untouched.
    pub fn dispatch(
        &mut self,
        request: EditRequest,
        buffer: &str,
        clipboard: &mut Clipboard,
    ) -> Result<String, EngineError> {
        let kind = request.kind();
        let cursor_before = self.cursor_index();

        let text = match request {
            EditRequest::Undo => self.undo(clipboard)?,
            EditRequest::Redo => self.redo(clipboard)?,
            request => self.apply(request, buffer, clipboard)?,
        };

        debug!(
            %kind,
            cursor_before,
            cursor_after = self.cursor_index(),
            history_len = self.commands.len(),
            "dispatched command"
        );
        Ok(text)
    }

    fn applied_count(&self) -> usize {
        self.cursor.map_or(0, |c| c + 1)
    }

    fn undo(&mut self, clipboard: &mut Clipboard) -> Result<String, EngineError> {
        let target = self.cursor.ok_or(EngineError::NoOperationToUndo)?;
        let text = Command::Undo { target }.execute(&self.commands, clipboard);
        self.cursor = target.checked_sub(1);
        Ok(text)
    }

    fn redo(&mut self, clipboard: &mut Clipboard) -> Result<String, EngineError> {
        if !self.can_redo() {
            return Err(EngineError::NoOperationToRedo);
        }
        let target = self.applied_count();
        let text = Command::Redo { target }.execute(&self.commands, clipboard);
        self.cursor = Some(target);
        Ok(text)
    }

    fn apply(
        &mut self,
        request: EditRequest,
        buffer: &str,
        clipboard: &mut Clipboard,
    ) -> Result<String, EngineError> {
        let kind = request.kind();
        let len = char_len(buffer);
        if let Some(range) = request.range() {
            match kind {
                CommandKind::Paste => range.check_paste_within(len)?,
                _ => range.check_within(len)?,
            }
        }

        if kind.is_recorded() {
            self.truncate_forward();
        }

        let Some(command) = Command::bind(request, buffer, self.cursor) else {
            return Ok(buffer.to_string());
        };
        let text = command.execute(&self.commands, clipboard);

        if let Some(entry) = command.duplicate() {
            self.commands.push(entry);
            self.cursor = Some(self.commands.len() - 1);
        }
        Ok(text)
    }

    fn truncate_forward(&mut self) {
        let forward = self.forward_count();
        if forward > 0 {
            debug!(discarded = forward, "new edit discards redo branch");
            self.commands.truncate(self.applied_count());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::CharRange;

    fn paste(start: usize, end: usize, text: &str) -> EditRequest {
        EditRequest::Paste {
            start,
            end,
            text: text.to_string(),
        }
    }

    struct Fixture {
        history: CommandHistory,
        clipboard: Clipboard,
        text: String,
    }

    impl Fixture {
        fn new(text: &str) -> Self {
            Self {
                history: CommandHistory::new(),
                clipboard: Clipboard::new(),
                text: text.to_string(),
            }
        }

        fn run(&mut self, request: EditRequest) -> Result<&str, EngineError> {
            self.text = self
                .history
                .dispatch(request, &self.text, &mut self.clipboard)?;
            Ok(&self.text)
        }
    }

    #[test]
    fn test_fresh_history_state() {
        let history = CommandHistory::new();
        assert_eq!(history.cursor_index(), -1);
        assert_eq!(history.forward_count(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.replayed_text(), "");
    }

    #[test]
    fn test_paste_replace_undo_redo_walk() {
        let mut fx = Fixture::new("");

        assert_eq!(fx.run(paste(0, 0, "AB")).unwrap(), "AB");
        assert_eq!(fx.history.cursor_index(), 0);
        assert_eq!(fx.run(paste(0, 1, "X")).unwrap(), "X");
        assert_eq!(fx.history.cursor_index(), 1);

        assert_eq!(fx.run(EditRequest::Undo).unwrap(), "AB");
        assert_eq!(fx.history.cursor_index(), 0);
        assert_eq!(fx.run(EditRequest::Undo).unwrap(), "");
        assert_eq!(fx.history.cursor_index(), -1);
        assert_eq!(fx.history.forward_count(), 2);

        assert_eq!(fx.run(EditRequest::Redo).unwrap(), "AB");
        assert_eq!(fx.history.cursor_index(), 0);
        assert_eq!(fx.run(EditRequest::Redo).unwrap(), "X");
        assert_eq!(fx.history.cursor_index(), 1);
    }

    #[test]
    fn test_meta_commands_reject_empty_directions() {
        let mut fx = Fixture::new("");
        assert_eq!(fx.run(EditRequest::Undo), Err(EngineError::NoOperationToUndo));
        assert_eq!(fx.run(EditRequest::Redo), Err(EngineError::NoOperationToRedo));

        fx.run(paste(0, 0, "A")).unwrap();
        assert_eq!(fx.run(EditRequest::Redo), Err(EngineError::NoOperationToRedo));
    }

    #[test]
    fn test_new_edit_truncates_forward_commands() {
        let mut fx = Fixture::new("");
        fx.run(paste(0, 0, "abc")).unwrap();
        fx.run(EditRequest::Delete { start: 0, end: 0 }).unwrap();
        fx.run(EditRequest::Delete { start: 0, end: 0 }).unwrap();
        fx.run(EditRequest::Undo).unwrap();
        fx.run(EditRequest::Undo).unwrap();
        assert_eq!(fx.history.forward_count(), 2);

        assert_eq!(fx.run(paste(2, 2, "!")).unwrap(), "abc!");
        assert_eq!(fx.history.len(), 2);
        assert_eq!(fx.history.forward_count(), 0);
        assert_eq!(fx.history.get(1).and_then(Command::previous), Some(0));
    }

    #[test]
    fn test_copy_keeps_forward_commands() {
        let mut fx = Fixture::new("");
        fx.run(paste(0, 0, "abc")).unwrap();
        fx.run(EditRequest::Undo).unwrap();
        fx.run(EditRequest::Redo).unwrap();
        fx.run(EditRequest::Delete { start: 0, end: 0 }).unwrap();
        fx.run(EditRequest::Undo).unwrap();

        assert_eq!(fx.run(EditRequest::Copy { start: 0, end: 1 }).unwrap(), "abc");
        assert_eq!(fx.history.forward_count(), 1);
        assert_eq!(fx.history.len(), 2);
        assert_eq!(fx.clipboard.last(), Some("ab"));
    }

    #[test]
    fn test_out_of_range_is_rejected_without_mutation() {
        let mut fx = Fixture::new("");
        fx.run(paste(0, 0, "abc")).unwrap();
        fx.run(EditRequest::Undo).unwrap();

        assert_eq!(
            fx.run(EditRequest::Delete { start: 0, end: 0 }),
            Err(EngineError::IndexOutOfRange {
                start: 0,
                end: 0,
                len: 0
            })
        );
        // The rejected edit must not have cut the redo branch.
        assert_eq!(fx.history.forward_count(), 1);
    }

    #[test]
    fn test_from_commands_rebinds_previous_and_checks_cursor() {
        let commands = vec![
            Command::bind(paste(0, 0, "a"), "", Some(7)).unwrap(),
            Command::bind(EditRequest::Delete { start: 0, end: 0 }, "a", None).unwrap(),
        ];

        let history = CommandHistory::from_commands(commands.clone(), 0).unwrap();
        assert_eq!(history.get(0).and_then(Command::previous), None);
        assert_eq!(history.get(1).and_then(Command::previous), Some(0));
        assert_eq!(history.replayed_text(), "a");
        assert_eq!(history.forward_count(), 1);

        assert_eq!(
            CommandHistory::from_commands(commands.clone(), 2),
            Err(EngineError::InvalidHistoryCursor { cursor: 2, len: 2 })
        );
        assert_eq!(
            CommandHistory::from_commands(commands, -2),
            Err(EngineError::InvalidHistoryCursor { cursor: -2, len: 2 })
        );

        let copy = Command::bind(EditRequest::Copy { start: 0, end: 0 }, "a", None).unwrap();
        assert_eq!(
            CommandHistory::from_commands(vec![copy], 0),
            Err(EngineError::UnrecordableCommand(CommandKind::Copy))
        );
    }

    #[test]
    fn test_from_commands_rejects_ranges_outside_their_snapshot() {
        let delete = Command::bind(EditRequest::Delete { start: 5, end: 9 }, "AB", None).unwrap();
        assert_eq!(
            CommandHistory::from_commands(vec![delete], 0),
            Err(EngineError::IndexOutOfRange {
                start: 5,
                end: 9,
                len: 2
            })
        );

        let paste_past_end = Command::bind(paste(3, 3, "x"), "AB", None).unwrap();
        assert_eq!(
            CommandHistory::from_commands(vec![paste_past_end], -1),
            Err(EngineError::IndexOutOfRange {
                start: 3,
                end: 3,
                len: 2
            })
        );

        let paste_into_empty = Command::bind(paste(0, 0, "x"), "", None).unwrap();
        assert!(CommandHistory::from_commands(vec![paste_into_empty], 0).is_ok());
    }

    #[test]
    fn test_replayed_text_with_nothing_applied_is_the_baseline() {
        let commands =
            vec![Command::bind(EditRequest::Delete { start: 0, end: 1 }, "HELLO", None).unwrap()];
        let history = CommandHistory::from_commands(commands, -1).unwrap();
        assert_eq!(history.replayed_text(), "HELLO");
        assert_eq!(history.get(0).map(Command::range), Some(CharRange::new(0, 1)));
    }
}
