use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
///
/// Besides database reachability this reports which optional providers
/// are wired, so a deployment missing e.g. the job-service token is
/// visible from the outside instead of only failing on first use.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status: `ok` when the database answers.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether the image generation pipeline is configured.
    pub generation_enabled: bool,
    /// Whether the prompt completion service is configured.
    pub prompts_enabled: bool,
}

/// GET /health -- service, database, and provider health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = aistagram_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        generation_enabled: state.pipeline.is_some(),
        prompts_enabled: state.prompts.is_some(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
