//! NoteStore trait definition.
//!
//! Abstracts the backing store so the service works with domain objects
//! regardless of where notes live.

use async_trait::async_trait;

use crate::note::{Note, NoteId};

use super::error::Result;

/// Field-level changes applied to a stored note.
///
/// `None` leaves the field untouched. Values are assigned verbatim; the
/// store does not validate them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Store trait for note operations.
///
/// Every method returns owned copies; callers never hold references into
/// the store's internal state.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Create a note and return its newly allocated ID.
    async fn create(&self, title: String, content: String) -> Result<NoteId>;

    /// List all notes.
    async fn get_all(&self) -> Result<Vec<Note>>;

    /// Get a note by ID.
    async fn get_by_id(&self, id: NoteId) -> Result<Note>;

    /// Apply changes to a note and stamp its update time.
    async fn update(&self, id: NoteId, changes: NoteChanges) -> Result<Note>;

    /// Delete a note.
    async fn delete(&self, id: NoteId) -> Result<()>;
}
