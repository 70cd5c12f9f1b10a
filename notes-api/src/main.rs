use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use notes_api::rest::{AppState, create_router};
use notes_api::{MemoryStore, NoteAuditLogger, NoteService};

#[derive(Parser)]
#[command(name = "notes-api")]
#[command(about = "Notes API Server - in-memory note CRUD over HTTP/JSON")]
struct Args {
    /// Listen address for the REST API
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    listen: String,

    /// Disable audit logging of note changes
    #[arg(long)]
    no_audit: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("notes_api=info".parse()?))
        .init();

    let args = Args::parse();

    let audit = if args.no_audit {
        Arc::new(NoteAuditLogger::new_noop())
    } else {
        Arc::new(NoteAuditLogger::new())
    };

    // Store is owned by the service; nothing else holds it
    let store = Arc::new(MemoryStore::new());
    let app_state = Arc::new(AppState {
        notes: NoteService::new(store),
        audit,
    });

    let router = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    info!("REST API listening on {}", listener.local_addr()?);
    info!("Swagger UI: http://{}/docs/", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
