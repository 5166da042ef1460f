pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::screening::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/screening/tables", get(handlers::handle_get_tables))
        .route("/api/v1/screening/screen", post(handlers::handle_screen))
        .route("/api/v1/screening/batch", post(handlers::handle_batch_screen))
        .route("/api/v1/screening/report", post(handlers::handle_report))
        .fallback(not_found)
        .with_state(state)
}
