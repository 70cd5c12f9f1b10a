//! Note service - validation and partial-update handling on top of a store.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::note::{Note, NoteId};
use crate::store::{NoteChanges, NoteStore, StoreError};

/// Errors surfaced by the note service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller-supplied data violates a field constraint.
    #[error("validation error: {0}")]
    Validation(String),

    /// No note with the given ID.
    #[error("note {0} not found")]
    NotFound(NoteId),

    /// Unexpected failure from the backing store.
    #[error("internal: {0}")]
    Internal(String),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            StoreError::Internal(msg) => ServiceError::Internal(msg),
        }
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Partial update request. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    /// Validate and normalize the patch into store changes.
    fn into_changes(self) -> Result<NoteChanges> {
        let title = self.title.map(|t| normalize_title(&t)).transpose()?;
        Ok(NoteChanges {
            title,
            content: self.content,
        })
    }
}

/// Trim a title and reject it when nothing is left.
fn normalize_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ServiceError::Validation("title is required".to_string()));
    }
    Ok(title.to_string())
}

/// Note service. The only caller of the store.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// Create a note. The returned note is read back from the store.
    pub async fn create_note(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Note> {
        let title = normalize_title(&title.into())?;
        let id = self.store.create(title, content.into()).await?;
        debug!(id, "note created");
        Ok(self.store.get_by_id(id).await?)
    }

    /// List all notes.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        Ok(self.store.get_all().await?)
    }

    /// Get a note by ID.
    pub async fn get_note(&self, id: NoteId) -> Result<Note> {
        Ok(self.store.get_by_id(id).await?)
    }

    /// Apply a partial update.
    ///
    /// An empty patch is still an update and bumps `updated_at`. A missing
    /// note is reported as `NotFound` even when the patch is also invalid.
    pub async fn update_note(&self, id: NoteId, patch: NotePatch) -> Result<Note> {
        let changes = match patch.into_changes() {
            Ok(changes) => changes,
            Err(e) => {
                self.store.get_by_id(id).await?;
                return Err(e);
            }
        };

        Ok(self.store.update(id, changes).await?)
    }

    /// Delete a note.
    pub async fn delete_note(&self, id: NoteId) -> Result<()> {
        Ok(self.store.delete(id).await?)
    }
}
