pub mod audit;
pub mod note;
pub mod rest;
pub mod service;
pub mod store;

pub use audit::NoteAuditLogger;
pub use note::{Note, NoteId};
pub use service::{NotePatch, NoteService, ServiceError};
pub use store::{MemoryStore, NoteChanges, NoteStore, StoreError};
