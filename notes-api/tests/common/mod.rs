//! Shared test utilities for notes-api integration tests.

use notes_api::rest::{AppState, create_router};
use notes_api::{MemoryStore, NoteAuditLogger, NoteService};
use reqwest::{Client, Response as ReqwestResponse};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Test server wrapper that serves the REST API over a fresh in-memory store.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl TestServer {
    /// Spawn a test server on an OS-assigned port.
    pub async fn spawn() -> Self {
        let store = Arc::new(MemoryStore::new());

        // Create app state with noop audit logger
        let app_state = Arc::new(AppState {
            notes: NoteService::new(store),
            audit: Arc::new(NoteAuditLogger::new_noop()),
        });

        let router = create_router(app_state);

        // Bind to port 0 to let OS choose available port
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let listener = TcpListener::bind(&addr).await.expect("Failed to bind");
        let actual_addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Server error");
        });

        let client = Client::new();

        Self {
            addr: actual_addr,
            client,
            shutdown_tx,
        }
    }

    /// Get base URL for the server root.
    pub fn root_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get base URL for the REST API.
    pub fn base_url(&self) -> String {
        format!("{}/api/v1", self.root_url())
    }

    /// Perform a GET request against the server root (outside `/api/v1`).
    pub async fn get_root(&self, path: &str) -> ReqwestResponse {
        self.client
            .get(format!("{}{}", self.root_url(), path))
            .send()
            .await
            .expect("Request failed")
    }

    /// Perform a GET request.
    pub async fn get(&self, path: &str) -> ReqwestResponse {
        self.client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await
            .expect("Request failed")
    }

    /// Perform a POST request with JSON body.
    pub async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> ReqwestResponse {
        self.client
            .post(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// Perform a POST request with a raw JSON-typed body.
    pub async fn post_raw(&self, path: &str, body: &'static str) -> ReqwestResponse {
        self.client
            .post(format!("{}{}", self.base_url(), path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// Perform a POST request with a raw body and an optional `Content-Type`.
    pub async fn post_with_content_type(
        &self,
        path: &str,
        body: &'static str,
        content_type: Option<&str>,
    ) -> ReqwestResponse {
        let mut request = self
            .client
            .post(format!("{}{}", self.base_url(), path))
            .body(body);
        if let Some(content_type) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        request.send().await.expect("Request failed")
    }

    /// Perform a PATCH request with JSON body.
    pub async fn patch_json<T: Serialize>(&self, path: &str, body: &T) -> ReqwestResponse {
        self.client
            .patch(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// Perform a PATCH request with a raw JSON-typed body.
    pub async fn patch_raw(&self, path: &str, body: &'static str) -> ReqwestResponse {
        self.client
            .patch(format!("{}{}", self.base_url(), path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// Perform a PATCH request with a raw body and an optional `Content-Type`.
    pub async fn patch_with_content_type(
        &self,
        path: &str,
        body: &'static str,
        content_type: Option<&str>,
    ) -> ReqwestResponse {
        let mut request = self
            .client
            .patch(format!("{}{}", self.base_url(), path))
            .body(body);
        if let Some(content_type) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        request.send().await.expect("Request failed")
    }

    /// Perform a DELETE request.
    pub async fn delete(&self, path: &str) -> ReqwestResponse {
        self.client
            .delete(format!("{}{}", self.base_url(), path))
            .send()
            .await
            .expect("Request failed")
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
    }
}
