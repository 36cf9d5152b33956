pub mod generation;
pub mod health;
pub mod preferences;
pub mod prompts;
pub mod share;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /images/generate          POST  run the generation pipeline
/// /images/{id}/like         POST  increment a post's like counter
///
/// /preferences              GET   fetch preferences (lazily created)
/// /preferences              PUT   partial update with clamping
///
/// /prompts                  POST  image prompts for a profile
/// /prompts/subjects         POST  photo subject ideas
/// /prompts/styles           POST  photo style ideas
///
/// /share                    POST  snapshot the caller's feed
/// /shared/{id}              GET   anonymous snapshot view
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Image generation and likes.
        .nest("/images", generation::router())
        // Per-user generation preferences.
        .nest("/preferences", preferences::router())
        // Persona-driven prompt generation.
        .nest("/prompts", prompts::router())
        // Shared-feed snapshots: authenticated create, anonymous read.
        .nest("/share", share::share_router())
        .nest("/shared", share::shared_router())
}
