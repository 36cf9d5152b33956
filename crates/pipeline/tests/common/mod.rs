//! Shared fixtures for pipeline tests: a scripted job service and
//! pre-wired pipelines over the in-memory stores.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use aistagram_db::models::post::{CreateGeneratedImagePost, GeneratedImagePost};
use aistagram_pipeline::memory::{MemoryBlobStore, MemoryCache, MemoryPostStore};
use aistagram_pipeline::stores::{JobService, PostStore, StoreError};
use aistagram_pipeline::{ImagePipeline, PipelineConfig};
use aistagram_replicate::{Prediction, PredictionInput, PredictionStatus, ReplicateApiError};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Bytes returned for every scripted output download.
pub const FAKE_IMAGE_BYTES: &[u8] = b"\x89PNG-not-really";

fn prediction(status: PredictionStatus, output: Option<&str>, error: Option<&str>) -> Prediction {
    Prediction {
        id: "job-1".to_string(),
        status,
        output: output.map(|url| vec![url.to_string()]),
        error: error.map(str::to_string),
    }
}

/// Job service double that records submissions and replays a scripted
/// sequence of poll results. An exhausted script keeps reporting
/// `processing`, which is how the timeout tests starve the poll loop.
pub struct ScriptedJobService {
    pub submissions: Mutex<Vec<(String, PredictionInput)>>,
    script: Mutex<VecDeque<Prediction>>,
    pub poll_count: AtomicUsize,
    pub fetched_urls: Mutex<Vec<String>>,
    fail_submit: bool,
    fail_poll: bool,
}

impl ScriptedJobService {
    fn with_script(script: Vec<Prediction>) -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            script: Mutex::new(script.into()),
            poll_count: AtomicUsize::new(0),
            fetched_urls: Mutex::new(Vec::new()),
            fail_submit: false,
            fail_poll: false,
        }
    }

    /// Never reaches a terminal state.
    pub fn idle() -> Self {
        Self::with_script(Vec::new())
    }

    /// Starts, reports `processing` for `processing_polls` polls, then
    /// succeeds with the given output URL.
    pub fn succeeding_after(processing_polls: usize, output_url: &str) -> Self {
        let mut script = vec![
            prediction(PredictionStatus::Processing, None, None);
            processing_polls
        ];
        script.push(prediction(
            PredictionStatus::Succeeded,
            Some(output_url),
            None,
        ));
        Self::with_script(script)
    }

    /// Succeeds but reports no output URLs.
    pub fn succeeding_without_output() -> Self {
        Self::with_script(vec![prediction(PredictionStatus::Succeeded, None, None)])
    }

    /// Fails on the first poll with the given service error message.
    pub fn failing_with(error: Option<&str>) -> Self {
        Self::with_script(vec![prediction(PredictionStatus::Failed, None, error)])
    }

    /// Rejects job creation with a non-2xx response.
    pub fn rejecting_submissions() -> Self {
        let mut service = Self::idle();
        service.fail_submit = true;
        service
    }

    /// Errors on every status poll.
    pub fn broken_polling() -> Self {
        let mut service = Self::idle();
        service.fail_poll = true;
        service
    }

    pub async fn submission_count(&self) -> usize {
        self.submissions.lock().await.len()
    }

    pub fn polls(&self) -> usize {
        self.poll_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobService for ScriptedJobService {
    async fn submit(
        &self,
        model_name: &str,
        input: &PredictionInput,
    ) -> Result<Prediction, ReplicateApiError> {
        if self.fail_submit {
            return Err(ReplicateApiError::ApiError {
                status: 402,
                body: "insufficient credit".to_string(),
            });
        }
        self.submissions
            .lock()
            .await
            .push((model_name.to_string(), input.clone()));
        Ok(prediction(PredictionStatus::Starting, None, None))
    }

    async fn poll(&self, _id: &str) -> Result<Prediction, ReplicateApiError> {
        self.poll_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_poll {
            return Err(ReplicateApiError::ApiError {
                status: 500,
                body: "status endpoint unavailable".to_string(),
            });
        }
        let mut script = self.script.lock().await;
        Ok(script
            .pop_front()
            .unwrap_or_else(|| prediction(PredictionStatus::Processing, None, None)))
    }

    async fn fetch_output(&self, url: &str) -> Result<Vec<u8>, ReplicateApiError> {
        self.fetched_urls.lock().await.push(url.to_string());
        Ok(FAKE_IMAGE_BYTES.to_vec())
    }
}

/// Post store that rejects every write, for the never-lose-asset tests.
pub struct FailingPostStore;

#[async_trait]
impl PostStore for FailingPostStore {
    async fn create_post(
        &self,
        _input: &CreateGeneratedImagePost,
    ) -> Result<GeneratedImagePost, StoreError> {
        Err(StoreError("connection refused".to_string()))
    }

    async fn increment_likes(&self, _post_id: &str) -> Result<Option<i64>, StoreError> {
        Err(StoreError("connection refused".to_string()))
    }
}

/// A pipeline wired to in-memory collaborators, with handles kept for
/// assertions.
pub struct PipelineFixture {
    pub pipeline: ImagePipeline,
    pub jobs: Arc<ScriptedJobService>,
    pub cache: Arc<MemoryCache>,
    pub blobs: Arc<MemoryBlobStore>,
    pub posts: Arc<MemoryPostStore>,
}

/// Public base URL minted by the fixture blob store.
pub const BLOB_BASE_URL: &str = "https://blob.test";

pub fn fixture(jobs: ScriptedJobService) -> PipelineFixture {
    let jobs = Arc::new(jobs);
    let cache = Arc::new(MemoryCache::new());
    let blobs = Arc::new(MemoryBlobStore::new(BLOB_BASE_URL));
    let posts = Arc::new(MemoryPostStore::new());
    let pipeline = ImagePipeline::new(
        jobs.clone(),
        cache.clone(),
        blobs.clone(),
        posts.clone(),
        PipelineConfig::default(),
    );
    PipelineFixture {
        pipeline,
        jobs,
        cache,
        blobs,
        posts,
    }
}
