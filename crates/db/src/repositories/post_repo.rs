//! Repository for the `generated_images` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::post::{CreateGeneratedImagePost, GeneratedImagePost};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, prompt, image_url, blob_key, cache_key, is_public, likes, created_at";

/// Provides persistence for generated image posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post, returning the created row.
    ///
    /// Uses the caller-supplied id when present (correlating with a UI
    /// placeholder), otherwise generates one. `likes` always starts at 0.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGeneratedImagePost,
    ) -> Result<GeneratedImagePost, sqlx::Error> {
        let id = input
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let query = format!(
            "INSERT INTO generated_images (id, user_id, prompt, image_url, blob_key, cache_key, is_public)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneratedImagePost>(&query)
            .bind(&id)
            .bind(&input.user_id)
            .bind(&input.prompt)
            .bind(&input.image_url)
            .bind(&input.blob_key)
            .bind(&input.cache_key)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    /// Find a post by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<GeneratedImagePost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generated_images WHERE id = $1");
        sqlx::query_as::<_, GeneratedImagePost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's posts, most recent first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<GeneratedImagePost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generated_images
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, GeneratedImagePost>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Atomically increment a post's like counter, returning the new count.
    ///
    /// The increment happens at the store level (not read-modify-write in
    /// application code), so concurrent likes serialize correctly.
    /// Returns `None` if no row with the given id exists.
    pub async fn increment_likes(pool: &PgPool, id: &str) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE generated_images SET likes = likes + 1 WHERE id = $1 RETURNING likes",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
