//! Route definitions for image generation.
//!
//! ```text
//! POST /generate       generate_image
//! POST /{id}/like      like_image
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Routes nested under `/images`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generation::generate_image))
        .route("/{id}/like", post(generation::like_image))
}
