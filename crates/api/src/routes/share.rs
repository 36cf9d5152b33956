//! Route definitions for shared feeds.
//!
//! ```text
//! POST /share         share_feed      (auth required)
//! GET  /shared/{id}   get_shared_feed (anonymous)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::share;
use crate::state::AppState;

/// Routes nested under `/share`.
pub fn share_router() -> Router<AppState> {
    Router::new().route("/", post(share::share_feed))
}

/// Routes nested under `/shared`.
pub fn shared_router() -> Router<AppState> {
    Router::new().route("/{id}", get(share::get_shared_feed))
}
