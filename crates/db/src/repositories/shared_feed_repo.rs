//! Repository for the `shared_feeds` table.

use sqlx::PgPool;

use crate::models::shared_feed::{CreateSharedFeed, SharedFeed};

const COLUMNS: &str = "id, user_id, snapshot, is_active, views, created_at, expires_at";

/// Provides persistence for shared-feed snapshots.
pub struct SharedFeedRepo;

impl SharedFeedRepo {
    /// Insert a new shared feed, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSharedFeed) -> Result<SharedFeed, sqlx::Error> {
        let query = format!(
            "INSERT INTO shared_feeds (id, user_id, snapshot, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SharedFeed>(&query)
            .bind(&input.id)
            .bind(&input.user_id)
            .bind(&input.snapshot)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an active, unexpired shared feed by id.
    pub async fn find_active(pool: &PgPool, id: &str) -> Result<Option<SharedFeed>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shared_feeds
             WHERE id = $1 AND is_active AND expires_at > now()"
        );
        sqlx::query_as::<_, SharedFeed>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically increment the view counter. Returns `false` if no row
    /// with the given id exists.
    pub async fn increment_views(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE shared_feeds SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Toggle whether a shared feed is served. Returns the updated row,
    /// or `None` if the id does not exist.
    pub async fn set_active(
        pool: &PgPool,
        id: &str,
        is_active: bool,
    ) -> Result<Option<SharedFeed>, sqlx::Error> {
        let query = format!(
            "UPDATE shared_feeds SET is_active = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SharedFeed>(&query)
            .bind(id)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }
}
