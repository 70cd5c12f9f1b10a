//! Note domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Note identifier, allocated by the store.
pub type NoteId = i64;

/// A titled piece of text with creation and update timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique note ID
    #[schema(example = 1)]
    pub id: NoteId,
    /// Note title, never blank
    #[schema(example = "My first note")]
    pub title: String,
    /// Note body, may be empty
    #[schema(example = "Some text...")]
    pub content: String,
    /// Creation time (UTC)
    pub created_at: DateTime<Utc>,
    /// Time of the last successful update (UTC), absent until the first update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
