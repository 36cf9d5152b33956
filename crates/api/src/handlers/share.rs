//! Handlers for shared-feed snapshots.
//!
//! Routes:
//! - `POST /share`       — freeze the caller's feed under a share id
//! - `GET  /shared/{id}` — anonymous snapshot view (no auth)

use aistagram_core::profile::CreatorProfile;
use aistagram_db::models::shared_feed::SharedPost;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub profile: CreatorProfile,
    /// The feed exactly as the caller sees it, like counts included.
    pub posts: Vec<SharedPost>,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    /// Relative path of the shared feed, e.g. `/shared/{id}`.
    pub share_url: String,
}

/// POST /api/v1/share
pub async fn share_feed(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ShareRequest>,
) -> AppResult<impl IntoResponse> {
    let share_url = state
        .sharer
        .share(&user.user_id, input.profile, input.posts)
        .await?;
    Ok(Json(DataResponse {
        data: ShareResponse { share_url },
    }))
}

/// GET /api/v1/shared/{id}
///
/// Anonymous: shared links work without a session. Expired or
/// deactivated feeds are indistinguishable from unknown ids (404).
pub async fn get_shared_feed(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.sharer.load(&id).await?;
    Ok(Json(DataResponse { data: snapshot }))
}
