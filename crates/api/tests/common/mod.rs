//! Shared helpers for API integration tests.

use std::sync::Arc;

use aistagram_pipeline::memory::MemoryCache;
use aistagram_pipeline::pg::PgFeedStore;
use aistagram_pipeline::FeedSharer;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use aistagram_api::auth::jwt::{generate_access_token, JwtConfig};
use aistagram_api::config::{ProviderConfig, ServerConfig};
use aistagram_api::router::build_app_router;
use aistagram_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 60-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 60,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        providers: ProviderConfig::default(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors `AppState::build` plus `build_app_router` from `main.rs`,
/// except that no provider credentials are configured: the generation
/// pipeline and prompt generator are absent, which is exactly the state
/// the `UNCONFIGURED` tests need. Everything DB-backed (preferences,
/// likes, shared feeds, health) is fully wired.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = Arc::new(test_config());
    let sharer = Arc::new(FeedSharer::new(
        Arc::new(PgFeedStore::new(pool.clone())),
        Arc::new(MemoryCache::new()),
    ));

    let state = AppState {
        pool,
        config: config.clone(),
        pipeline: None,
        sharer,
        prompts: None,
    };

    build_app_router(state, &config)
}

/// Mint a valid bearer token for the given user id.
pub fn token_for(user_id: &str) -> String {
    let config = test_config();
    generate_access_token(user_id, &config.jwt).expect("token generation should succeed")
}

/// Insert a user row so FK-constrained fixtures can hang off it.
pub async fn seed_user(pool: &PgPool, id: &str) {
    aistagram_db::repositories::UserRepo::create(pool, id, &format!("{id}@example.com"), None)
        .await
        .expect("user insert should succeed");
}

/// Send a GET request without authentication.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Send a JSON request with a bearer token.
pub async fn send_json(
    app: Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
