use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use wq_core::{Error, Result};

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/quiz/generate", post(handlers::generate_quiz))
        .route("/api/quiz/history", get(handlers::quiz_history))
        .route(
            "/api/quiz/:id",
            get(handlers::get_quiz).delete(handlers::delete_quiz),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves the API until the process is stopped.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Config(format!("Failed to bind {}: {}", addr, e)))?;
    info!("🌐 Listening on http://{}", addr);

    axum::serve(listener, create_app(state))
        .await
        .map_err(|e| Error::Config(format!("Server error: {}", e)))
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use wq_core::{Error, Result};
}
