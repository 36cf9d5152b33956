//! Feed sharing: immutable snapshots with a cache mirror.
//!
//! A share is copy semantics — the post list, including like counts at
//! share time, is frozen into the snapshot. Later likes or edits on the
//! live feed never change it.

use std::sync::Arc;
use std::time::Duration;

use aistagram_core::error::GenError;
use aistagram_core::keys;
use aistagram_core::profile::CreatorProfile;
use aistagram_db::models::shared_feed::{CreateSharedFeed, SharedFeedSnapshot, SharedPost};
use uuid::Uuid;

use crate::stores::{CacheStore, FeedStore};

/// Shared feeds expire after 30 days, in both the durable store and the
/// cache mirror.
pub const SHARE_TTL_DAYS: i64 = 30;

/// Persists and serves shared-feed snapshots.
pub struct FeedSharer {
    feeds: Arc<dyn FeedStore>,
    cache: Arc<dyn CacheStore>,
}

impl FeedSharer {
    pub fn new(feeds: Arc<dyn FeedStore>, cache: Arc<dyn CacheStore>) -> Self {
        Self { feeds, cache }
    }

    /// Snapshot a feed under a new shareable id.
    ///
    /// Writes one durable row plus one cache mirror (for fast anonymous
    /// reads), both with a 30-day expiry, and returns the relative share
    /// path.
    pub async fn share(
        &self,
        user_id: &str,
        profile: CreatorProfile,
        posts: Vec<SharedPost>,
    ) -> Result<String, GenError> {
        if user_id.is_empty() {
            return Err(GenError::Unauthenticated);
        }

        let id = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now();
        let expires_at = created_at + chrono::Duration::days(SHARE_TTL_DAYS);

        let snapshot = SharedFeedSnapshot {
            profile,
            posts,
            created_at,
            expires_at,
        };
        let snapshot_json = serde_json::to_value(&snapshot)
            .map_err(|e| GenError::PersistenceFailed(e.to_string()))?;

        self.feeds
            .create_feed(&CreateSharedFeed {
                id: id.clone(),
                user_id: user_id.to_string(),
                snapshot: snapshot_json.clone(),
                expires_at,
            })
            .await
            .map_err(|e| GenError::PersistenceFailed(e.to_string()))?;

        self.cache
            .set(
                &keys::feed_cache_key(&id),
                snapshot_json.to_string(),
                Some(Duration::from_secs(60 * 60 * 24 * SHARE_TTL_DAYS as u64)),
            )
            .await;

        tracing::info!(feed_id = %id, user_id, post_count = snapshot.posts.len(), "Shared feed created");
        Ok(format!("/shared/{id}"))
    }

    /// Toggle whether a shared feed is served.
    ///
    /// Deactivation invalidates the cache mirror as well — otherwise the
    /// mirror would keep serving the snapshot for up to 30 days after
    /// the durable store stopped. Reactivation leaves the mirror cold;
    /// reads fall back to the durable store.
    pub async fn set_active(&self, id: &str, is_active: bool) -> Result<(), GenError> {
        let existed = self
            .feeds
            .set_active(id, is_active)
            .await
            .map_err(|e| GenError::PersistenceFailed(e.to_string()))?;
        if !existed {
            return Err(GenError::NotFound(format!("shared feed {id}")));
        }
        if !is_active {
            self.cache.delete(&keys::feed_cache_key(id)).await;
        }
        tracing::info!(feed_id = %id, is_active, "Shared feed toggled");
        Ok(())
    }

    /// Load a shared snapshot for anonymous viewing, cache first.
    ///
    /// Increments the view counter; a failed increment is logged and the
    /// feed is still served.
    pub async fn load(&self, id: &str) -> Result<SharedFeedSnapshot, GenError> {
        let snapshot = match self.cache.get(&keys::feed_cache_key(id)).await {
            Some(raw) => serde_json::from_str::<SharedFeedSnapshot>(&raw)
                .map_err(|e| GenError::PersistenceFailed(format!("corrupt feed mirror: {e}")))?,
            None => {
                let feed = self
                    .feeds
                    .find_active(id)
                    .await
                    .map_err(|e| GenError::PersistenceFailed(e.to_string()))?
                    .ok_or_else(|| GenError::NotFound(format!("shared feed {id}")))?;
                serde_json::from_value(feed.snapshot)
                    .map_err(|e| GenError::PersistenceFailed(format!("corrupt snapshot: {e}")))?
            }
        };

        match self.feeds.increment_views(id).await {
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(feed_id = %id, error = %e, "Failed to increment view count");
            }
        }

        Ok(snapshot)
    }
}
