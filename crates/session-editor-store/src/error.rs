use session_editor_core::EngineError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced while decoding history or clipboard text.
pub enum CodecError {
    #[error("unexpected end of input while reading {field} (line {line})")]
    /// The input ended in the middle of a record.
    UnexpectedEof {
        /// Field being read.
        field: &'static str,
        /// 1-based line number where more input was expected.
        line: usize,
    },

    #[error("invalid {field} '{value}' on line {line}")]
    /// A numeric line did not parse.
    InvalidNumber {
        /// Field being read.
        field: &'static str,
        /// Offending line content.
        value: String,
        /// 1-based line number.
        line: usize,
    },

    #[error("unknown command tag '{tag}' on line {line}")]
    /// A command record carried a tag that is not a recorded command kind.
    UnknownCommandTag {
        /// Offending tag.
        tag: String,
        /// 1-based line number.
        line: usize,
    },

    #[error("unexpected data after the last record on line {line}")]
    /// Lines remained after the declared number of records.
    TrailingData {
        /// 1-based line number.
        line: usize,
    },

    #[error("history file is for session '{found}', expected '{expected}'")]
    /// The session name inside a history file differs from the name it is indexed under.
    NameMismatch {
        /// File name listed in the index.
        expected: String,
        /// File name recorded on the first line of the history file.
        found: String,
    },

    #[error(transparent)]
    /// The decoded parts were rejected by the engine (bad name, cursor, ...).
    Engine(#[from] EngineError),
}

#[derive(Debug, Error)]
/// Errors produced by the session store.
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    /// A file or directory could not be read.
    Read {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    /// A file or directory could not be written, created or removed.
    Write {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    #[error("corrupt metadata in {}: {source}", path.display())]
    /// A metadata file was read but did not decode.
    Corrupt {
        /// Path of the corrupt file.
        path: PathBuf,
        /// Decoding error.
        #[source]
        source: CodecError,
    },

    #[error("invalid store configuration: {0}")]
    /// The JSON configuration did not parse.
    Config(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Write {
            path: path.into(),
            source,
        }
    }
}
