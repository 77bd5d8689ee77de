//! # Errors
//!
//! Two layers of errors exist:
//!
//! - [`NoteError`] is what store internals produce: a validation failure, a
//!   missing id, or a persistence failure (including I/O and JSON errors).
//! - [`OperationError`] is what the five public store operations return. Its
//!   `Display` is a stable, operation-named message ("Failed to create note")
//!   suitable for showing to a user. The underlying [`NoteError`] stays
//!   reachable through [`std::error::Error::source`] and [`OperationError::kind`].

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NoteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NoteError::Validation(_) => ErrorKind::Validation,
            NoteError::NotFound(_) => ErrorKind::NotFound,
            NoteError::Persistence(_)
            | NoteError::Io(_)
            | NoteError::Serialization(_)
            | NoteError::Config(_) => ErrorKind::Persistence,
        }
    }
}

pub type Result<T> = std::result::Result<T, NoteError>;

/// Coarse error category, stable across storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Persistence,
}

/// The public store operations, used to name failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Retrieve,
    Update,
    Delete,
    Search,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Operation::Create => "create note",
            Operation::Retrieve => "retrieve notes",
            Operation::Update => "update note",
            Operation::Delete => "delete note",
            Operation::Search => "search notes",
        };
        f.write_str(verb)
    }
}

#[derive(Error, Debug)]
#[error("Failed to {operation}")]
pub struct OperationError {
    pub operation: Operation,
    #[source]
    pub source: NoteError,
}

impl OperationError {
    pub fn new(operation: Operation, source: NoteError) -> Self {
        Self { operation, source }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

pub type OpResult<T> = std::result::Result<T, OperationError>;
