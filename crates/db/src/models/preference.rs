//! User generation preferences model and DTOs.

use aistagram_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `user_preferences` table (1:1 with users, created
/// lazily on first read).
///
/// `inference_steps` and `guidance_scale` are always clamped into the
/// model's bounds before being persisted; see
/// `aistagram_core::params::GenerationConfig::resolve`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserPreferences {
    pub user_id: EntityId,
    pub model_type: String,
    pub inference_steps: i32,
    pub guidance_scale: f64,
    pub aspect_ratio: String,
    pub safety_checker_enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating preferences. Only non-`None` fields are applied;
/// the handler resolves/clamps before calling the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserPreferences {
    pub model_type: Option<String>,
    pub inference_steps: Option<i32>,
    pub guidance_scale: Option<f64>,
    pub aspect_ratio: Option<String>,
    pub safety_checker_enabled: Option<bool>,
}
