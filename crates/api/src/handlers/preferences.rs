//! Handlers for per-user generation preferences.
//!
//! Routes:
//! - `GET /preferences`  — fetch (lazily creating defaults)
//! - `PUT /preferences`  — partial update with clamping

use aistagram_core::params::{GenerationConfig, ModelType};
use aistagram_db::models::preference::{UpdateUserPreferences, UserPreferences};
use aistagram_db::repositories::PreferenceRepo;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/preferences
///
/// First read creates the default row (fast model, 2 steps, guidance
/// 5.5, square ratio, safety checker on).
pub async fn get_preferences(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let prefs = PreferenceRepo::find_or_create(&state.pool, &user.user_id).await?;
    Ok(Json(DataResponse { data: prefs }))
}

/// PUT /api/v1/preferences
///
/// Partial update: absent fields keep their stored value. An unknown
/// model type is rejected; numeric values are clamped into the selected
/// model's bounds, so a model switch re-clamps the step count instead of
/// resetting it.
pub async fn update_preferences(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateUserPreferences>,
) -> AppResult<impl IntoResponse> {
    let current = PreferenceRepo::find_or_create(&state.pool, &user.user_id).await?;

    let model = match &input.model_type {
        Some(raw) => ModelType::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown model type: {raw}")))?,
        None => parse_stored_model(&current)?,
    };

    let resolved = GenerationConfig::resolve(
        model,
        input.inference_steps.unwrap_or(current.inference_steps),
        input.guidance_scale.unwrap_or(current.guidance_scale),
        input
            .aspect_ratio
            .as_deref()
            .unwrap_or(&current.aspect_ratio),
        input
            .safety_checker_enabled
            .unwrap_or(current.safety_checker_enabled),
    );

    let saved = PreferenceRepo::upsert(
        &state.pool,
        &user.user_id,
        resolved.model.as_str(),
        resolved.inference_steps,
        resolved.guidance_scale,
        &resolved.aspect_ratio,
        resolved.safety_checker_enabled,
    )
    .await?;

    Ok(Json(DataResponse { data: saved }))
}

/// Resolve a stored preference row into a clamped generation config.
///
/// Rows are clamped on write, so this normally changes nothing; it is
/// the single place raw stored values become submission parameters.
pub(crate) fn resolve_config(prefs: &UserPreferences) -> Result<GenerationConfig, AppError> {
    let model = parse_stored_model(prefs)?;
    Ok(GenerationConfig::resolve(
        model,
        prefs.inference_steps,
        prefs.guidance_scale,
        &prefs.aspect_ratio,
        prefs.safety_checker_enabled,
    ))
}

/// A stored model type that no longer parses means the column was
/// written outside the API. Fail closed rather than defaulting.
fn parse_stored_model(prefs: &UserPreferences) -> Result<ModelType, AppError> {
    ModelType::parse(&prefs.model_type).ok_or_else(|| {
        AppError::InternalError(format!(
            "stored model type {:?} is not recognized",
            prefs.model_type
        ))
    })
}
