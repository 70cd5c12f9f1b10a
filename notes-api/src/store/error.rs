//! Store error types.

use thiserror::Error;

use crate::note::NoteId;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Note not found.
    #[error("note {0} not found")]
    NotFound(NoteId),

    /// Internal error. Never produced by the in-memory store.
    #[error("internal: {0}")]
    Internal(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
