pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::assembly::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pages API
        .route("/api/v1/pages/blocks", get(handlers::handle_list_blocks))
        .route("/api/v1/pages/preview", post(handlers::handle_preview))
        .route("/api/v1/pages/export", post(handlers::handle_export_bundle))
        .route(
            "/api/v1/pages/export/:format",
            post(handlers::handle_export_format),
        )
        .fallback(not_found)
        .with_state(state)
}
