//! Generated image post model and DTOs.

use aistagram_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `generated_images` table.
///
/// Created exactly once per successful generation; mutated only by the
/// like increment. `image_url` is always the blob-store URL — the job
/// service's output URL is never persisted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GeneratedImagePost {
    pub id: EntityId,
    pub user_id: EntityId,
    pub prompt: String,
    pub image_url: String,
    pub blob_key: String,
    pub cache_key: String,
    pub is_public: bool,
    pub likes: i64,
    pub created_at: Timestamp,
}

/// DTO for inserting a new generated image post.
///
/// `id` may be caller-supplied to correlate with a client-side
/// placeholder; `None` means server-generated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGeneratedImagePost {
    pub id: Option<EntityId>,
    pub user_id: EntityId,
    pub prompt: String,
    pub image_url: String,
    pub blob_key: String,
    pub cache_key: String,
    pub is_public: Option<bool>,
}
