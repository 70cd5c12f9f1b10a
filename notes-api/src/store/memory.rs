//! MemoryStore implementation - process-lifetime note storage.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::note::{Note, NoteId};

use super::error::{Result, StoreError};
use super::traits::{NoteChanges, NoteStore};

#[derive(Debug, Default)]
struct Notes {
    by_id: BTreeMap<NoteId, Note>,
    /// Last allocated ID. Only ever grows, so IDs are never reissued.
    last_id: NoteId,
}

/// MemoryStore keeps all notes in a single map behind one `RwLock`.
///
/// Reads share the lock, writes take it exclusively. Notes are cloned on
/// the way out, so a coarse lock is all the synchronization needed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: RwLock<Notes>,
}

impl MemoryStore {
    /// Create an empty store. The first note gets ID 1.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryStore {
    /// Number of stored notes.
    pub async fn len(&self) -> usize {
        self.notes.read().await.by_id.len()
    }

    /// Whether the store holds no notes.
    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.by_id.is_empty()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create(&self, title: String, content: String) -> Result<NoteId> {
        let mut notes = self.notes.write().await;

        notes.last_id += 1;
        let id = notes.last_id;
        notes.by_id.insert(
            id,
            Note {
                id,
                title,
                content,
                created_at: Utc::now(),
                updated_at: None,
            },
        );

        debug!(id, "note stored");
        Ok(id)
    }

    async fn get_all(&self) -> Result<Vec<Note>> {
        let notes = self.notes.read().await;
        Ok(notes.by_id.values().cloned().collect())
    }

    async fn get_by_id(&self, id: NoteId) -> Result<Note> {
        let notes = self.notes.read().await;
        notes.by_id.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: NoteId, changes: NoteChanges) -> Result<Note> {
        let mut notes = self.notes.write().await;
        let note = notes.by_id.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if let Some(title) = changes.title {
            note.title = title;
        }
        if let Some(content) = changes.content {
            note.content = content;
        }
        note.updated_at = Some(Utc::now());

        debug!(id, "note updated");
        Ok(note.clone())
    }

    async fn delete(&self, id: NoteId) -> Result<()> {
        let mut notes = self.notes.write().await;
        if notes.by_id.remove(&id).is_none() {
            return Err(StoreError::NotFound(id));
        }

        debug!(id, "note removed");
        Ok(())
    }
}
