//! The image generation pipeline.
//!
//! One invocation walks a fixed sequence:
//!
//! ```text
//! INIT → CACHE_CHECK → (hit: return cached URL)
//!                    → (miss: SUBMIT → POLL* → SUCCEEDED → FETCH
//!                       → STORE_BLOB → CACHE_WRITE → DB_WRITE → return)
//!                                    → FAILED  → typed error
//!                                    → TIMEOUT → typed error
//! ```
//!
//! A cache hit short-circuits persistence, not just computation:
//! repeated identical prompts by the same user never create a second
//! billable job or a duplicate row. The cache only covers *completed*
//! generations — two concurrent identical requests both miss and both
//! submit; there is no claim/lease on the key (known gap, left open).

use std::sync::Arc;
use std::time::Duration;

use aistagram_core::error::GenError;
use aistagram_core::keys;
use aistagram_core::params::{GenerationConfig, DEFAULT_ASPECT_RATIO};
use aistagram_db::models::post::CreateGeneratedImagePost;
use aistagram_replicate::{PredictionInput, PredictionStatus};
use tokio_util::sync::CancellationToken;

use crate::stores::{BlobStore, CacheStore, JobService, PostStore};

/// Default fixed poll interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Default wall-clock budget measured from job submission.
pub const DEFAULT_POLL_BUDGET: Duration = Duration::from_secs(30);

/// Tunable pipeline parameters.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Fixed interval between status polls. No backoff, no jitter — the
    /// overall budget is short and tests depend on sub-2s granularity.
    pub poll_interval: Duration,
    /// Wall-clock budget from submission to terminal state.
    pub poll_budget: Duration,
    /// TTL for image cache entries; `None` defers to the store default.
    pub image_cache_ttl: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_budget: DEFAULT_POLL_BUDGET,
            image_cache_ttl: None,
        }
    }
}

/// One generation request, as received from an authenticated caller.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Resolved from the session. Empty means no session — hard failure.
    pub user_id: String,
    /// Caller-supplied post id correlating with a UI placeholder.
    pub post_id: Option<String>,
}

/// Successful pipeline outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Canonical (blob store) URL. The job service's output URL is
    /// never returned or persisted.
    pub url: String,
    pub aspect_ratio: String,
}

/// Orchestrates cache, job service, blob store, and durable store for
/// image generation and likes.
pub struct ImagePipeline {
    jobs: Arc<dyn JobService>,
    cache: Arc<dyn CacheStore>,
    blobs: Arc<dyn BlobStore>,
    posts: Arc<dyn PostStore>,
    config: PipelineConfig,
}

impl ImagePipeline {
    pub fn new(
        jobs: Arc<dyn JobService>,
        cache: Arc<dyn CacheStore>,
        blobs: Arc<dyn BlobStore>,
        posts: Arc<dyn PostStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            jobs,
            cache,
            blobs,
            posts,
            config,
        }
    }

    /// Generate one image post, or return a typed failure.
    ///
    /// Side effects per call: at most one billable job, one blob upload,
    /// one cache write, at most one database insert. SUBMIT always
    /// precedes POLL precedes STORE_BLOB/DB_WRITE; nothing is submitted
    /// in parallel within one invocation.
    ///
    /// Cancelling `cancel` stops the poll loop at the next suspension
    /// point so an abandoned request does not hold the loop for the full
    /// budget; cancellation surfaces as [`GenError::Timeout`].
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        config: &GenerationConfig,
        cancel: &CancellationToken,
    ) -> Result<GeneratedImage, GenError> {
        if request.user_id.is_empty() {
            return Err(GenError::Unauthenticated);
        }
        let prompt = request.prompt.trim();
        if prompt.is_empty() {
            return Err(GenError::SubmissionFailed(
                "prompt must not be empty".to_string(),
            ));
        }

        // CACHE_CHECK: a hit returns the memoized URL with the default
        // ratio assumption; no job, no row.
        let cache_key = keys::image_cache_key(&request.user_id, prompt);
        if let Some(url) = self.cache.get(&cache_key).await {
            tracing::debug!(user_id = %request.user_id, "image cache hit");
            return Ok(GeneratedImage {
                url,
                aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            });
        }

        // SUBMIT
        let input = PredictionInput::single(
            prompt,
            config.guidance_scale,
            config.inference_steps,
            &config.aspect_ratio,
            config.safety_checker_enabled,
            config.model.go_fast(),
        );
        let mut prediction = self
            .jobs
            .submit(config.model.model_name(), &input)
            .await
            .map_err(|e| GenError::SubmissionFailed(e.to_string()))?;

        tracing::info!(
            user_id = %request.user_id,
            prediction_id = %prediction.id,
            model = config.model.model_name(),
            steps = config.inference_steps,
            "Submitted generation job"
        );

        // POLL until terminal or the budget elapses.
        let deadline = tokio::time::Instant::now() + self.config.poll_budget;
        let output_url = loop {
            match prediction.status {
                PredictionStatus::Succeeded => match prediction.first_output() {
                    Some(url) => break url.to_string(),
                    // Succeeded without an output is a failure, not retried.
                    None => {
                        return Err(GenError::GenerationFailed(
                            "job succeeded without an output".to_string(),
                        ))
                    }
                },
                PredictionStatus::Failed | PredictionStatus::Canceled => {
                    return Err(GenError::GenerationFailed(
                        prediction
                            .error
                            .clone()
                            .unwrap_or_else(|| "Image generation failed".to_string()),
                    ));
                }
                PredictionStatus::Starting | PredictionStatus::Processing => {}
            }

            if tokio::time::Instant::now() >= deadline {
                tracing::warn!(prediction_id = %prediction.id, "Generation poll budget exceeded");
                return Err(GenError::Timeout);
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(prediction_id = %prediction.id, "Generation cancelled by caller");
                    return Err(GenError::Timeout);
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }

            prediction = self
                .jobs
                .poll(&prediction.id)
                .await
                .map_err(|e| GenError::PollFailed(e.to_string()))?;
        };

        // FETCH + STORE_BLOB: the blob URL is canonical from here on.
        let bytes = self
            .jobs
            .fetch_output(&output_url)
            .await
            .map_err(|e| GenError::GenerationFailed(format!("failed to download output: {e}")))?;

        let blob_key = keys::blob_key(&request.user_id, chrono::Utc::now().timestamp_millis());
        let url = self
            .blobs
            .put(&blob_key, bytes)
            .await
            .map_err(|e| GenError::GenerationFailed(format!("failed to store output: {e}")))?;

        // CACHE_WRITE first so a racing identical request hits sooner.
        self.cache
            .set(&cache_key, url.clone(), self.config.image_cache_ttl)
            .await;

        // DB_WRITE is allowed to fail independently: the paid asset is
        // never wasted, so the caller still gets success with the URL.
        let create = CreateGeneratedImagePost {
            id: request.post_id.clone(),
            user_id: request.user_id.clone(),
            prompt: prompt.to_string(),
            image_url: url.clone(),
            blob_key,
            cache_key,
            is_public: None,
        };
        if let Err(e) = self.posts.create_post(&create).await {
            tracing::error!(
                user_id = %request.user_id,
                error = %e,
                "Generated image could not be persisted; returning the asset anyway"
            );
        }

        Ok(GeneratedImage {
            url,
            aspect_ratio: config.aspect_ratio.clone(),
        })
    }

    /// Increment a post's like counter exactly once, returning the new
    /// count. Repeated likes by the same user are not deduplicated.
    pub async fn like(&self, post_id: &str, user_id: &str) -> Result<i64, GenError> {
        if user_id.is_empty() {
            return Err(GenError::Unauthenticated);
        }
        self.posts
            .increment_likes(post_id)
            .await
            .map_err(|e| GenError::PersistenceFailed(e.to_string()))?
            .ok_or_else(|| GenError::NotFound(format!("post {post_id}")))
    }
}
