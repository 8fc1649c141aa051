//! Line-oriented text encoding of session history and clipboard.
//!
//! # History file
//!
//! ```text
//! notes.txt          session file name
//! 2                  command count
//! 1                  cursor (-1 = nothing applied)
//! PasteCommand       -- one record per command --
//! <snapshot lines>
//! ---
//! <paste text lines> (Paste only)
//! ---
//! 0                  start offset
//! 0                  end offset
//! DeleteCommand
//! ...
//! ```
//!
//! # Clipboard file
//!
//! Each fragment followed by a `---` line.
//!
//! # Text blocks
//!
//! A text field is written line by line, each line newline-terminated, then closed by the
//! [`DELIMITER`] line. Decoding joins the lines back with `'\n'`, which strips the terminator
//! of the final line. A content line equal to the delimiter, or starting with [`ESCAPE`], gets
//! one extra leading [`ESCAPE`] so arbitrary text survives the round trip.
//!
//! The escape makes this layout incompatible with a purely literal one: a file written without
//! escaping reads back with the first `\` stripped from every line that starts with one.
//! Lines without a leading `\` read the same either way.

use crate::error::CodecError;
use session_editor_core::{Clipboard, Command, CommandHistory, CommandKind, EditRequest, Session};
use std::fmt::Write as _;
use std::str::FromStr;

/// Line closing every text block.
pub const DELIMITER: &str = "---";

/// Prefix protecting content lines that would otherwise be misread.
pub const ESCAPE: char = '\\';

/// Decoded history file, waiting for its clipboard and buffer text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHistory {
    /// Session file name (suffix included).
    pub file_name: String,
    /// Rebuilt history.
    pub history: CommandHistory,
}

impl DecodedHistory {
    /// Assemble the session. `text` defaults to the text replayed from the history.
    pub fn into_session(
        self,
        clipboard: Clipboard,
        text: Option<String>,
    ) -> Result<Session, CodecError> {
        let text = text.unwrap_or_else(|| self.history.replayed_text());
        Ok(Session::from_parts(
            &self.file_name,
            self.history,
            clipboard,
            text,
        )?)
    }
}

/// Encode a session's history file.
pub fn encode_history(session: &Session) -> String {
    let history = session.history();
    let mut out = String::new();
    push_line(&mut out, session.file_name());
    push_line(&mut out, history.len());
    push_line(&mut out, history.cursor_index());

    for command in history.iter() {
        push_line(&mut out, command.kind().tag());
        push_block(&mut out, command.snapshot());
        if command.kind() == CommandKind::Paste {
            push_block(&mut out, command.paste_text());
        }
        let range = command.range();
        push_line(&mut out, range.start);
        push_line(&mut out, range.end);
    }
    out
}

/// Decode a history file produced by [`encode_history`].
pub fn decode_history(input: &str) -> Result<DecodedHistory, CodecError> {
    let mut lines = LineReader::new(input);
    let file_name = lines.next_line("session name")?.to_string();
    let count: usize = lines.next_number("command count")?;
    let cursor: isize = lines.next_number("history cursor")?;

    let mut commands = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        commands.push(decode_command(&mut lines)?);
    }
    lines.expect_end()?;

    Ok(DecodedHistory {
        file_name,
        history: CommandHistory::from_commands(commands, cursor)?,
    })
}

/// Encode a clipboard file.
pub fn encode_clipboard(clipboard: &Clipboard) -> String {
    let mut out = String::new();
    for fragment in clipboard.iter() {
        push_block(&mut out, fragment);
    }
    out
}

/// Decode a clipboard file produced by [`encode_clipboard`].
pub fn decode_clipboard(input: &str) -> Result<Clipboard, CodecError> {
    let mut lines = LineReader::new(input);
    let mut clipboard = Clipboard::new();
    while !lines.at_end() {
        clipboard.push(lines.next_block("clipboard fragment")?);
    }
    Ok(clipboard)
}

fn decode_command(lines: &mut LineReader<'_>) -> Result<Command, CodecError> {
    let line = lines.line_no + 1;
    let tag = lines.next_line("command tag")?;
    let kind = CommandKind::from_tag(tag)
        .filter(|kind| kind.is_recorded())
        .ok_or_else(|| CodecError::UnknownCommandTag {
            tag: tag.to_string(),
            line,
        })?;

    let snapshot = lines.next_block("command snapshot")?;
    let paste_text = match kind {
        CommandKind::Paste => lines.next_block("paste text")?,
        _ => String::new(),
    };
    let start: usize = lines.next_number("start offset")?;
    let end: usize = lines.next_number("end offset")?;

    let request = EditRequest::from_parts(kind, start, end, &paste_text);
    Command::bind(request, &snapshot, None).ok_or(CodecError::UnknownCommandTag {
        tag: tag.to_string(),
        line,
    })
}

fn push_line(out: &mut String, value: impl std::fmt::Display) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{value}");
}

fn push_block(out: &mut String, text: &str) {
    for line in text.split('\n') {
        if line == DELIMITER || line.starts_with(ESCAPE) {
            out.push(ESCAPE);
        }
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push('\n');
}

/// Cursor over `'\n'`-separated lines; `'\r'` is kept as content.
struct LineReader<'a> {
    lines: std::iter::Peekable<std::str::Split<'a, char>>,
    line_no: usize,
}

impl<'a> LineReader<'a> {
    fn new(input: &'a str) -> Self {
        // Every record line is newline-terminated; drop the empty tail after the last one.
        let body = input.strip_suffix('\n').unwrap_or(input);
        let mut lines = body.split('\n').peekable();
        if body.is_empty() {
            lines.next();
        }
        Self { lines, line_no: 0 }
    }

    fn at_end(&mut self) -> bool {
        self.lines.peek().is_none()
    }

    fn next_line(&mut self, field: &'static str) -> Result<&'a str, CodecError> {
        let line = self.lines.next().ok_or(CodecError::UnexpectedEof {
            field,
            line: self.line_no + 1,
        })?;
        self.line_no += 1;
        Ok(line)
    }

    fn next_number<T: FromStr>(&mut self, field: &'static str) -> Result<T, CodecError> {
        let value = self.next_line(field)?;
        value.trim().parse().map_err(|_| CodecError::InvalidNumber {
            field,
            value: value.to_string(),
            line: self.line_no,
        })
    }

    fn next_block(&mut self, field: &'static str) -> Result<String, CodecError> {
        let mut parts = Vec::new();
        loop {
            let line = self.next_line(field)?;
            if line == DELIMITER {
                return Ok(parts.join("\n"));
            }
            parts.push(line.strip_prefix(ESCAPE).unwrap_or(line));
        }
    }

    fn expect_end(&mut self) -> Result<(), CodecError> {
        if self.at_end() {
            Ok(())
        } else {
            Err(CodecError::TrailingData {
                line: self.line_no + 1,
            })
        }
    }
}
