//! REST API: handlers, router and OpenAPI document.

mod handlers;
mod routes;

pub use handlers::{ApiError, AppState, CreateNoteRequest, ErrorResponse, UpdateNoteRequest};
pub use routes::{ApiDoc, create_router};
