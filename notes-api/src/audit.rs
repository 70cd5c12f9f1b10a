use tracing::info;

use crate::note::NoteId;

/// Target for audit events, so they can be filtered or routed separately
/// (e.g. `RUST_LOG=notes_api::audit=info`).
pub const AUDIT_TARGET: &str = "notes_api::audit";

/// Notes API audit logger
pub struct NoteAuditLogger {
    enabled: bool,
}

impl NoteAuditLogger {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn new_noop() -> Self {
        Self { enabled: false }
    }

    pub fn note_created(&self, note_id: NoteId, title: &str) {
        if self.enabled {
            info!(target: AUDIT_TARGET, note_id, title, "Note created");
        }
    }

    pub fn note_updated(&self, note_id: NoteId) {
        if self.enabled {
            info!(target: AUDIT_TARGET, note_id, "Note updated");
        }
    }

    pub fn note_deleted(&self, note_id: NoteId) {
        if self.enabled {
            info!(target: AUDIT_TARGET, note_id, "Note deleted");
        }
    }
}

impl Default for NoteAuditLogger {
    fn default() -> Self {
        Self::new()
    }
}
