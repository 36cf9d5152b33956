use std::sync::Arc;

use aistagram_pipeline::completion::OpenAiCompletions;
use aistagram_pipeline::memory::MemoryCache;
use aistagram_pipeline::pg::{PgFeedStore, PgPostStore};
use aistagram_pipeline::prompts::PromptGenerator;
use aistagram_pipeline::{blob::HttpBlobStore, FeedSharer, ImagePipeline, PipelineConfig};
use aistagram_replicate::ReplicateApi;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
///
/// `pipeline` and `prompts` are `None` when the corresponding provider
/// credentials are absent; handlers turn that into an `UNCONFIGURED`
/// error instead of the whole server refusing to start.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: aistagram_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Image generation pipeline, present when the job service and blob
    /// store are both configured.
    pub pipeline: Option<Arc<ImagePipeline>>,
    /// Shared-feed snapshot service.
    pub sharer: Arc<FeedSharer>,
    /// Prompt generator, present when the completion service is configured.
    pub prompts: Option<Arc<PromptGenerator>>,
}

impl AppState {
    /// Wire the production collaborators from configuration.
    ///
    /// The cache is a single in-process store shared by the image
    /// pipeline and the shared-feed mirror.
    pub fn build(pool: aistagram_db::DbPool, config: Arc<ServerConfig>) -> Self {
        let cache = Arc::new(MemoryCache::new());

        let pipeline = match (
            &config.providers.replicate_token,
            &config.providers.blob_url,
            &config.providers.blob_token,
        ) {
            (Some(replicate_token), Some(blob_url), Some(blob_token)) => {
                Some(Arc::new(ImagePipeline::new(
                    Arc::new(ReplicateApi::new(replicate_token.clone())),
                    cache.clone(),
                    Arc::new(HttpBlobStore::new(blob_url.clone(), blob_token.clone())),
                    Arc::new(PgPostStore::new(pool.clone())),
                    PipelineConfig::default(),
                )))
            }
            _ => {
                tracing::warn!(
                    "Image generation disabled: REPLICATE_API_TOKEN / BLOB_STORE_URL / \
                     BLOB_STORE_TOKEN not fully configured"
                );
                None
            }
        };

        let prompts = match &config.providers.openai_key {
            Some(key) => Some(Arc::new(PromptGenerator::new(Arc::new(
                OpenAiCompletions::new(key.clone()),
            )))),
            None => {
                tracing::warn!("Prompt generation disabled: OPENAI_API_KEY not configured");
                None
            }
        };

        let sharer = Arc::new(FeedSharer::new(
            Arc::new(PgFeedStore::new(pool.clone())),
            cache,
        ));

        Self {
            pool,
            config,
            pipeline,
            sharer,
            prompts,
        }
    }
}
