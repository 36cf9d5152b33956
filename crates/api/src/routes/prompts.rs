//! Route definitions for prompt generation.
//!
//! ```text
//! POST /           image_prompts
//! POST /subjects   photo_subjects
//! POST /styles     photo_styles
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

/// Routes nested under `/prompts`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(prompts::image_prompts))
        .route("/subjects", post(prompts::photo_subjects))
        .route("/styles", post(prompts::photo_styles))
}
