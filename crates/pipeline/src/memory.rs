//! In-memory store implementations.
//!
//! [`MemoryCache`] is the single-process production cache (the trait
//! keeps the seam for an external KV); the other implementations back
//! the pipeline tests.

use std::collections::HashMap;
use std::time::Duration;

use aistagram_db::models::post::{CreateGeneratedImagePost, GeneratedImagePost};
use aistagram_db::models::shared_feed::{CreateSharedFeed, SharedFeed};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use crate::stores::{CacheStore, FeedStore, PostStore, StoreError};

/// TTL-aware in-process key-value store.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, (String, Option<Instant>)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some((_, Some(expires))) if Instant::now() >= *expires => {}
                Some((value, _)) => return Some(value.clone()),
                None => return None,
            }
        }
        // Expired: evict lazily so dead entries do not accumulate. Re-check
        // under the write lock in case a fresh value landed in between.
        let mut entries = self.entries.write().await;
        if let Some((_, Some(expires))) = entries.get(key) {
            if Instant::now() >= *expires {
                entries.remove(key);
            }
        }
        None
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) {
        let expires = ttl.map(|d| Instant::now() + d);
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value, expires));
    }

    async fn delete(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}

/// Blob store that keeps objects in memory and mints URLs under a fixed
/// public base.
pub struct MemoryBlobStore {
    base_url: String,
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub async fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(key).cloned()
    }
}

#[async_trait]
impl crate::stores::BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, StoreError> {
        self.objects
            .write()
            .await
            .insert(key.to_string(), bytes);
        Ok(format!("{}/{}", self.base_url, key))
    }
}

/// Post store backed by a map; increments serialize on the write lock.
#[derive(Default)]
pub struct MemoryPostStore {
    posts: RwLock<HashMap<String, GeneratedImagePost>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &str) -> Option<GeneratedImagePost> {
        self.posts.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create_post(
        &self,
        input: &CreateGeneratedImagePost,
    ) -> Result<GeneratedImagePost, StoreError> {
        let post = GeneratedImagePost {
            id: input
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: input.user_id.clone(),
            prompt: input.prompt.clone(),
            image_url: input.image_url.clone(),
            blob_key: input.blob_key.clone(),
            cache_key: input.cache_key.clone(),
            is_public: input.is_public.unwrap_or(false),
            likes: 0,
            created_at: chrono::Utc::now(),
        };
        self.posts
            .write()
            .await
            .insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn increment_likes(&self, post_id: &str) -> Result<Option<i64>, StoreError> {
        let mut posts = self.posts.write().await;
        Ok(posts.get_mut(post_id).map(|post| {
            post.likes += 1;
            post.likes
        }))
    }
}

/// Feed store backed by a map.
#[derive(Default)]
pub struct MemoryFeedStore {
    feeds: RwLock<HashMap<String, SharedFeed>>,
}

impl MemoryFeedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedStore for MemoryFeedStore {
    async fn create_feed(&self, input: &CreateSharedFeed) -> Result<SharedFeed, StoreError> {
        let feed = SharedFeed {
            id: input.id.clone(),
            user_id: input.user_id.clone(),
            snapshot: input.snapshot.clone(),
            is_active: true,
            views: 0,
            created_at: chrono::Utc::now(),
            expires_at: input.expires_at,
        };
        self.feeds
            .write()
            .await
            .insert(feed.id.clone(), feed.clone());
        Ok(feed)
    }

    async fn find_active(&self, id: &str) -> Result<Option<SharedFeed>, StoreError> {
        let feeds = self.feeds.read().await;
        Ok(feeds
            .get(id)
            .filter(|feed| feed.is_active && feed.expires_at > chrono::Utc::now())
            .cloned())
    }

    async fn increment_views(&self, id: &str) -> Result<bool, StoreError> {
        let mut feeds = self.feeds.write().await;
        match feeds.get_mut(id) {
            Some(feed) => {
                feed.views += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_active(&self, id: &str, is_active: bool) -> Result<bool, StoreError> {
        let mut feeds = self.feeds.write().await;
        match feeds.get_mut(id) {
            Some(feed) => {
                feed.is_active = is_active;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn expired_entries_are_evicted_on_read() {
        let cache = MemoryCache::new();
        cache
            .set("k", "v".to_string(), Some(Duration::from_secs(1)))
            .await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get("k").await.is_none());
        // The read dropped the dead entry, it did not just skip it.
        assert!(cache.entries.read().await.is_empty());
    }

    #[tokio::test]
    async fn entries_without_ttl_stay_until_deleted() {
        let cache = MemoryCache::new();
        cache.set("k", "v".to_string(), None).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));

        cache.delete("k").await;
        assert!(cache.get("k").await.is_none());
        cache.delete("k").await; // deleting an absent key is a no-op
    }
}
