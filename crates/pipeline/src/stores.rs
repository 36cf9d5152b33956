//! Collaborator seams for the generation pipeline.
//!
//! The pipeline never reaches for ambient globals: every external
//! collaborator (cache, blob store, job service, durable stores) is an
//! explicitly constructed, injected trait object with a defined
//! lifecycle. The durable store is the source of truth; the cache is a
//! non-authoritative accelerator.

use aistagram_db::models::post::{CreateGeneratedImagePost, GeneratedImagePost};
use aistagram_db::models::shared_feed::{CreateSharedFeed, SharedFeed};
use aistagram_replicate::{Prediction, PredictionInput, ReplicateApi, ReplicateApiError};
use async_trait::async_trait;
use std::time::Duration;

/// Opaque failure from a store implementation.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Key-value store with optional TTL.
///
/// Get/set failures in remote implementations are handled (and logged)
/// internally — a broken cache degrades to misses rather than failing
/// the request.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>);
    /// Drop an entry. Used to invalidate a mirror whose source of truth
    /// changed; deleting an absent key is a no-op.
    async fn delete(&self, key: &str);
}

/// Object storage accepting bytes and returning a public URL.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, StoreError>;
}

/// The external image job service: submit, poll, download.
#[async_trait]
pub trait JobService: Send + Sync {
    /// Create a job on the named model. The model name is part of the
    /// submission target, so an unknown name is a configuration error
    /// surfaced by the service, never silently defaulted.
    async fn submit(
        &self,
        model_name: &str,
        input: &PredictionInput,
    ) -> Result<Prediction, ReplicateApiError>;

    /// Observe a job's current state.
    async fn poll(&self, id: &str) -> Result<Prediction, ReplicateApiError>;

    /// Download the bytes behind an output URL.
    async fn fetch_output(&self, url: &str) -> Result<Vec<u8>, ReplicateApiError>;
}

#[async_trait]
impl JobService for ReplicateApi {
    async fn submit(
        &self,
        model_name: &str,
        input: &PredictionInput,
    ) -> Result<Prediction, ReplicateApiError> {
        ReplicateApi::submit(self, model_name, input).await
    }

    async fn poll(&self, id: &str) -> Result<Prediction, ReplicateApiError> {
        self.get_prediction(id).await
    }

    async fn fetch_output(&self, url: &str) -> Result<Vec<u8>, ReplicateApiError> {
        ReplicateApi::fetch_output(self, url).await
    }
}

/// Durable store for generated image posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create_post(
        &self,
        input: &CreateGeneratedImagePost,
    ) -> Result<GeneratedImagePost, StoreError>;

    /// Atomic `likes += 1`, returning the new count, or `None` if the
    /// post does not exist.
    async fn increment_likes(&self, post_id: &str) -> Result<Option<i64>, StoreError>;
}

/// Durable store for shared-feed snapshots.
#[async_trait]
pub trait FeedStore: Send + Sync {
    async fn create_feed(&self, input: &CreateSharedFeed) -> Result<SharedFeed, StoreError>;

    /// Find an active, unexpired feed.
    async fn find_active(&self, id: &str) -> Result<Option<SharedFeed>, StoreError>;

    /// Atomic `views += 1`. Returns `false` if the feed does not exist.
    async fn increment_views(&self, id: &str) -> Result<bool, StoreError>;

    /// Toggle whether a feed is served. Returns `false` if the feed
    /// does not exist.
    async fn set_active(&self, id: &str, is_active: bool) -> Result<bool, StoreError>;
}
