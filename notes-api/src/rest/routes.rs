use axum::{
    Router,
    extract::Request,
    http::HeaderName,
    response::{IntoResponse, Response},
    routing::get,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{Span, error, info_span};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, ApiError, AppState};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notes API",
        version = "1.0.0",
        description = "REST API for creating, reading, updating and deleting notes.",
        license(name = "MIT")
    ),
    tags(
        (name = "system", description = "Health check"),
        (name = "notes", description = "Note CRUD operations")
    ),
    paths(
        handlers::health,
        handlers::create_note,
        handlers::list_notes,
        handlers::get_note,
        handlers::update_note,
        handlers::delete_note,
    ),
    components(schemas(
        crate::note::Note,
        handlers::CreateNoteRequest,
        handlers::UpdateNoteRequest,
        handlers::ErrorResponse,
    ))
)]
pub struct ApiDoc;

/// Build the HTTP router: note API under `/api/v1`, health check, and Swagger UI at `/docs`.
pub fn create_router(state: Arc<AppState>) -> Router {
    let note_routes = Router::new()
        .route(
            "/notes",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route(
            "/notes/",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route(
            "/notes/{id}",
            get(handlers::get_note)
                .patch(handlers::update_note)
                .delete(handlers::delete_note),
        );

    let router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health))
        .nest("/api/v1", note_routes)
        .with_state(state);

    with_middleware(router)
}

/// Wrap a router in request-id, tracing and panic recovery layers.
fn with_middleware(router: Router) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    // Layers wrap outside-in from the bottom: the request ID is set before
    // tracing sees the request, and panics surface as a traced 500.
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

fn request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id,
    )
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    error!("handler panicked: {}", detail);
    ApiError::internal().into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_note_paths() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/v1/notes"));
        assert!(doc.paths.paths.contains_key("/api/v1/notes/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }

    async fn panicking_handler() -> &'static str {
        panic!("handler failed")
    }

    #[tokio::test]
    async fn test_panicking_handler_returns_internal_error() {
        let router = with_middleware(Router::new().route("/panic", get(panicking_handler)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let response = reqwest::get(format!("http://{}/panic", addr)).await.unwrap();
        assert_eq!(response.status(), 500);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, serde_json::json!({ "error": "internal error" }));
    }
}
