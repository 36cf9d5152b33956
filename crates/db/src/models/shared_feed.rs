//! Shared feed snapshot models.
//!
//! A share is **copy semantics**: the full post list (including like
//! counts at share time) is serialized into the `snapshot` jsonb column.
//! Later likes or edits on the live feed never change a snapshot.

use aistagram_core::profile::CreatorProfile;
use aistagram_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `shared_feeds` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SharedFeed {
    pub id: EntityId,
    pub user_id: EntityId,
    pub snapshot: serde_json::Value,
    pub is_active: bool,
    pub views: i64,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// One post inside a snapshot, frozen at share time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedPost {
    pub id: EntityId,
    pub image_url: Option<String>,
    pub aspect_ratio: String,
    pub likes: i64,
    pub comments: Vec<String>,
}

/// The immutable payload stored in `shared_feeds.snapshot` and mirrored
/// into the cache under `feed:{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedFeedSnapshot {
    pub profile: CreatorProfile,
    pub posts: Vec<SharedPost>,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

/// DTO for creating a shared feed row.
#[derive(Debug, Clone)]
pub struct CreateSharedFeed {
    pub id: EntityId,
    pub user_id: EntityId,
    pub snapshot: serde_json::Value,
    pub expires_at: Timestamp,
}
