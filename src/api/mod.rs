pub mod models;
pub mod recipes;
pub mod render;

// Re-exports
pub use models::*;

use axum::{extract::State, routing::get, Json, Router};
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::error;

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, total_recipes) = match state.store.count().await {
        Ok(count) => ("healthy", count),
        Err(e) => {
            error!("Health check failed: {}", e);
            ("unhealthy", 0)
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: state.store.backend().to_string(),
        total_recipes,
    })
}

/// Full application router: pages, health check and static assets
pub fn router(state: AppState, assets_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(recipes::routes())
        .nest_service("/assets", ServeDir::new(assets_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
