//! Repository for the `user_preferences` table.

use sqlx::PgPool;

use crate::models::preference::UserPreferences;

const COLUMNS: &str = "user_id, model_type, inference_steps, guidance_scale, aspect_ratio, \
                       safety_checker_enabled, created_at, updated_at";

/// Provides persistence for per-user generation preferences.
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Find a user's preferences, creating the default row lazily on the
    /// first read. The insert races benignly with itself: `ON CONFLICT`
    /// keeps whichever row landed first.
    pub async fn find_or_create(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<UserPreferences, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_preferences (user_id)
             VALUES ($1)
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserPreferences>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Upsert fully-resolved preference values.
    ///
    /// Callers clamp through the parameter resolver first — raw request
    /// values must never reach this method.
    pub async fn upsert(
        pool: &PgPool,
        user_id: &str,
        model_type: &str,
        inference_steps: i32,
        guidance_scale: f64,
        aspect_ratio: &str,
        safety_checker_enabled: bool,
    ) -> Result<UserPreferences, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_preferences
                (user_id, model_type, inference_steps, guidance_scale, aspect_ratio, safety_checker_enabled)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id) DO UPDATE SET
                model_type = EXCLUDED.model_type,
                inference_steps = EXCLUDED.inference_steps,
                guidance_scale = EXCLUDED.guidance_scale,
                aspect_ratio = EXCLUDED.aspect_ratio,
                safety_checker_enabled = EXCLUDED.safety_checker_enabled,
                updated_at = now()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserPreferences>(&query)
            .bind(user_id)
            .bind(model_type)
            .bind(inference_steps)
            .bind(guidance_scale)
            .bind(aspect_ratio)
            .bind(safety_checker_enabled)
            .fetch_one(pool)
            .await
    }
}
