//! Error types for gpoaudit

use std::fmt;
use thiserror::Error;

/// Position in the source document
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input path does not exist
    FileNotFound { path: String },
    /// Input path exists but is not an XML file
    NotXml { path: String },
    /// Input could not be read
    ReadFailed { path: String, reason: String },
    /// Output could not be written
    WriteFailed { path: String, reason: String },
    /// Input is not valid UTF-8
    InvalidUtf8,
    /// Structurally malformed markup
    Malformed,
    /// Unrecognized character or numeric entity
    InvalidEntity,
    /// Report lacks a required configuration section
    MissingSection { section: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path } => write!(f, "file not found: {path}"),
            Self::NotXml { path } => write!(f, "not an XML file: {path}"),
            Self::ReadFailed { path, reason } => {
                write!(f, "failed to read {path}: {reason}")
            }
            Self::WriteFailed { path, reason } => {
                write!(f, "failed to write {path}: {reason}")
            }
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
            Self::Malformed => write!(f, "malformed document"),
            Self::InvalidEntity => write!(f, "invalid xml entity"),
            Self::MissingSection { section } => {
                write!(f, "document missing required configuration section: {section}")
            }
        }
    }
}

/// Main error type for gpoaudit
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    pos: Option<Pos>,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            pos: None,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, pos: Option<Pos>, message: impl Into<String>) -> Self {
        Self {
            kind,
            pos,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn pos(&self) -> Option<Pos> {
        self.pos
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when the report parsed cleanly but lacked Computer or User
    pub fn is_missing_section(&self) -> bool {
        matches!(self.kind, ErrorKind::MissingSection { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "error at {}: {}", pos, self.message),
            None => write!(f, "error: {}", self.message),
        }
    }
}

/// Result type alias for gpoaudit
pub type Result<T> = std::result::Result<T, Error>;
