//! Error types for the Table actor.

use thiserror::Error;

/// Errors that can occur during table operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    #[error("Table not found: {0}")]
    NotFound(String),

    /// The table exists but belongs to another outlet.
    #[error("Invalid table for this outlet: {table} is not in {outlet}")]
    WrongOutlet { table: String, outlet: String },

    #[error("Table label must not be empty")]
    EmptyLabel,

    #[error("Table label already used in this outlet: {0}")]
    DuplicateLabel(String),

    #[error("Invalid capacity: {0}")]
    InvalidCapacity(u32),

    #[error("Table {0} is leased; release it first")]
    StillLeased(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for TableError {
    fn from(msg: String) -> Self {
        TableError::ActorCommunicationError(msg)
    }
}
