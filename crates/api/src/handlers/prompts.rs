//! Handlers for persona-driven prompt generation.
//!
//! Routes:
//! - `POST /prompts/subjects` — photo subject ideas for an AI type
//! - `POST /prompts/styles`   — photo style ideas for a type + subject
//! - `POST /prompts`          — image prompts for a full profile

use std::sync::Arc;

use aistagram_core::error::GenError;
use aistagram_core::profile::CreatorProfile;
use aistagram_pipeline::prompts::{PromptGenerator, DEFAULT_PROMPT_COUNT};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubjectsRequest {
    pub ai_type: String,
}

#[derive(Debug, Deserialize)]
pub struct StylesRequest {
    pub ai_type: String,
    pub photo_subject: String,
}

#[derive(Debug, Deserialize)]
pub struct ImagePromptsRequest {
    #[serde(flatten)]
    pub profile: CreatorProfile,
    /// Number of prompts to generate (default 20).
    #[serde(default)]
    pub count: Option<usize>,
}

/// POST /api/v1/prompts/subjects
pub async fn photo_subjects(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<SubjectsRequest>,
) -> AppResult<impl IntoResponse> {
    let generator = require_prompts(&state)?;
    let prompts = generator.photo_subjects(&input.ai_type).await?;
    Ok(Json(DataResponse { data: prompts }))
}

/// POST /api/v1/prompts/styles
pub async fn photo_styles(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<StylesRequest>,
) -> AppResult<impl IntoResponse> {
    let generator = require_prompts(&state)?;
    let prompts = generator
        .photo_styles(&input.ai_type, &input.photo_subject)
        .await?;
    Ok(Json(DataResponse { data: prompts }))
}

/// POST /api/v1/prompts
pub async fn image_prompts(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<ImagePromptsRequest>,
) -> AppResult<impl IntoResponse> {
    let generator = require_prompts(&state)?;
    let count = input.count.unwrap_or(DEFAULT_PROMPT_COUNT);
    let prompts = generator.image_prompts(&input.profile, count).await?;
    Ok(Json(DataResponse { data: prompts }))
}

fn require_prompts(state: &AppState) -> Result<Arc<PromptGenerator>, GenError> {
    state
        .prompts
        .clone()
        .ok_or_else(|| GenError::Unconfigured("completion service credentials".to_string()))
}
