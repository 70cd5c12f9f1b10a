//! Note storage.

mod error;
mod memory;
mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use traits::{NoteChanges, NoteStore};
