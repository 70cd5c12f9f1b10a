use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::audit::NoteAuditLogger;
use crate::note::{Note, NoteId};
use crate::service::{NotePatch, NoteService, ServiceError};

/// Shared application state
pub struct AppState {
    pub notes: NoteService,
    pub audit: Arc<NoteAuditLogger>,
}

/// API error response body
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "note not found")]
    pub error: String,
}

/// API error: an HTTP status plus the message returned to the client
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "note not found")
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => ApiError::not_found(),
            ServiceError::Validation(_) => ApiError::bad_request("invalid data"),
            ServiceError::Internal(msg) => {
                error!("internal error: {}", msg);
                ApiError::internal()
            }
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!("rejected path: {}", rejection.body_text());
        ApiError::bad_request("invalid id")
    }
}

/// Decode a JSON request body. The `Content-Type` header is not consulted.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("rejected body: {}", e);
        ApiError::bad_request("invalid JSON")
    })
}

// === Health ===

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = String, content_type = "text/plain")
    ),
    tag = "system"
)]
pub async fn health() -> &'static str {
    "OK"
}

// === Note CRUD ===

/// Request to create a note
#[derive(Default, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note title (required, must not be blank)
    #[serde(default)]
    #[schema(example = "My first note")]
    pub title: String,
    /// Note body
    #[serde(default)]
    #[schema(example = "Some text...")]
    pub content: String,
}

/// Request to partially update a note. Omitted or null fields stay unchanged.
#[derive(Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// New title (optional)
    #[schema(example = "Updated title")]
    pub title: Option<String>,
    /// New body (optional, empty string clears it)
    #[schema(example = "Updated text")]
    pub content: Option<String>,
}

impl From<UpdateNoteRequest> for NotePatch {
    fn from(req: UpdateNoteRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}

/// Create a new note
#[utoipa::path(
    post,
    path = "/api/v1/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = Note),
        (status = 400, description = "Invalid JSON or missing title", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    // A `null` body reads as a request with every field omitted
    let req = decode_body::<Option<CreateNoteRequest>>(&body)?.unwrap_or_default();

    let note = state
        .notes
        .create_note(req.title, req.content)
        .await
        .map_err(|e| match e {
            ServiceError::Validation(_) => ApiError::bad_request("title is required"),
            other => other.into(),
        })?;

    state.audit.note_created(note.id, &note.title);
    Ok((StatusCode::CREATED, Json(note)))
}

/// List all notes
#[utoipa::path(
    get,
    path = "/api/v1/notes",
    responses(
        (status = 200, description = "List of notes", body = Vec<Note>),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn list_notes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.list_notes().await?;
    Ok(Json(notes))
}

/// Get a note by ID
#[utoipa::path(
    get,
    path = "/api/v1/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = Note),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    path: Result<Path<NoteId>, PathRejection>,
) -> Result<Json<Note>, ApiError> {
    let Path(id) = path?;
    let note = state.notes.get_note(id).await?;
    Ok(Json(note))
}

/// Partially update a note
///
/// Either field may be omitted; an empty body still bumps `updatedAt`.
#[utoipa::path(
    patch,
    path = "/api/v1/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated", body = Note),
        (status = 400, description = "Invalid ID, JSON or data", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    path: Result<Path<NoteId>, PathRejection>,
    body: Bytes,
) -> Result<Json<Note>, ApiError> {
    let Path(id) = path?;
    let patch = decode_body::<Option<UpdateNoteRequest>>(&body)?
        .map(NotePatch::from)
        .unwrap_or_default();

    let note = state.notes.update_note(id, patch).await?;
    state.audit.note_updated(note.id);
    Ok(Json(note))
}

/// Delete a note
#[utoipa::path(
    delete,
    path = "/api/v1/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    path: Result<Path<NoteId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    state.notes.delete_note(id).await?;
    state.audit.note_deleted(id);
    Ok(StatusCode::NO_CONTENT)
}
