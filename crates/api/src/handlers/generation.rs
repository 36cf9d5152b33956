//! Handlers for image generation and likes.
//!
//! Routes:
//! - `POST /images/generate`    — run the generation pipeline
//! - `POST /images/{id}/like`   — increment a post's like counter

use std::sync::Arc;

use aistagram_core::error::GenError;
use aistagram_pipeline::{GenerationRequest, ImagePipeline};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::AppResult;
use crate::handlers::preferences::resolve_config;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
    /// Optional client-assigned post id, correlating the stored row with
    /// a UI placeholder.
    #[serde(default)]
    pub post_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateImageResponse {
    pub url: String,
    pub aspect_ratio: String,
}

/// POST /api/v1/images/generate
///
/// Resolves the caller's stored preferences into a clamped generation
/// config and runs the pipeline. Slow jobs surface as 504 after the
/// 30-second poll budget.
pub async fn generate_image(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<GenerateImageRequest>,
) -> AppResult<impl IntoResponse> {
    let pipeline = require_pipeline(&state)?;

    let prefs = aistagram_db::repositories::PreferenceRepo::find_or_create(
        &state.pool,
        &user.user_id,
    )
    .await?;
    let config = resolve_config(&prefs)?;

    let request = GenerationRequest {
        prompt: input.prompt,
        user_id: user.user_id,
        post_id: input.post_id,
    };

    let cancel = CancellationToken::new();
    let image = pipeline.generate(&request, &config, &cancel).await?;

    Ok(Json(DataResponse {
        data: GenerateImageResponse {
            url: image.url,
            aspect_ratio: image.aspect_ratio,
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub likes: i64,
}

/// POST /api/v1/images/{id}/like
///
/// Likes are a plain counter: repeat likes from the same user all count.
/// Goes straight to the repository so likes keep working even when the
/// generation providers are not configured.
pub async fn like_image(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(post_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let likes = aistagram_db::repositories::PostRepo::increment_likes(&state.pool, &post_id)
        .await?
        .ok_or(GenError::NotFound(format!("post {post_id}")))?;

    Ok(Json(DataResponse {
        data: LikeResponse { likes },
    }))
}

fn require_pipeline(state: &AppState) -> Result<Arc<ImagePipeline>, GenError> {
    state.pipeline.clone().ok_or_else(|| {
        GenError::Unconfigured("image generation provider credentials".to_string())
    })
}
