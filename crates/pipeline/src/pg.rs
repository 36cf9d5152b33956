//! Postgres-backed store adapters.

use aistagram_db::models::post::{CreateGeneratedImagePost, GeneratedImagePost};
use aistagram_db::models::shared_feed::{CreateSharedFeed, SharedFeed};
use aistagram_db::repositories::{PostRepo, SharedFeedRepo};
use aistagram_db::DbPool;
use async_trait::async_trait;

use crate::stores::{FeedStore, PostStore, StoreError};

/// [`PostStore`] over the `generated_images` table.
pub struct PgPostStore {
    pool: DbPool,
}

impl PgPostStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn create_post(
        &self,
        input: &CreateGeneratedImagePost,
    ) -> Result<GeneratedImagePost, StoreError> {
        PostRepo::create(&self.pool, input)
            .await
            .map_err(|e| StoreError(e.to_string()))
    }

    async fn increment_likes(&self, post_id: &str) -> Result<Option<i64>, StoreError> {
        PostRepo::increment_likes(&self.pool, post_id)
            .await
            .map_err(|e| StoreError(e.to_string()))
    }
}

/// [`FeedStore`] over the `shared_feeds` table.
pub struct PgFeedStore {
    pool: DbPool,
}

impl PgFeedStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedStore for PgFeedStore {
    async fn create_feed(&self, input: &CreateSharedFeed) -> Result<SharedFeed, StoreError> {
        SharedFeedRepo::create(&self.pool, input)
            .await
            .map_err(|e| StoreError(e.to_string()))
    }

    async fn find_active(&self, id: &str) -> Result<Option<SharedFeed>, StoreError> {
        SharedFeedRepo::find_active(&self.pool, id)
            .await
            .map_err(|e| StoreError(e.to_string()))
    }

    async fn increment_views(&self, id: &str) -> Result<bool, StoreError> {
        SharedFeedRepo::increment_views(&self.pool, id)
            .await
            .map_err(|e| StoreError(e.to_string()))
    }

    async fn set_active(&self, id: &str, is_active: bool) -> Result<bool, StoreError> {
        SharedFeedRepo::set_active(&self.pool, id, is_active)
            .await
            .map(|row| row.is_some())
            .map_err(|e| StoreError(e.to_string()))
    }
}
