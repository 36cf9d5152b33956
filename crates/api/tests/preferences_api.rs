//! Integration tests for the preferences endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, seed_user, send_json, token_for};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn first_read_creates_defaults(pool: PgPool) {
    seed_user(&pool, "u1").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/preferences", &token_for("u1")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let prefs = &json["data"];
    assert_eq!(prefs["model_type"], "flux-schnell");
    assert_eq!(prefs["inference_steps"], 2);
    assert_eq!(prefs["guidance_scale"], 5.5);
    assert_eq!(prefs["aspect_ratio"], "1:1");
    assert_eq!(prefs["safety_checker_enabled"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unauthenticated_read_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/preferences").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHENTICATED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_clamps_into_model_bounds(pool: PgPool) {
    seed_user(&pool, "u1").await;
    let app = common::build_test_app(pool.clone());
    let token = token_for("u1");

    // 100 steps and guidance 9.9 on the fast model clamp down to 4 / 6.0.
    let response = send_json(
        app,
        "PUT",
        "/api/v1/preferences",
        Some(&token),
        json!({ "inference_steps": 100, "guidance_scale": 9.9 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["inference_steps"], 4);
    assert_eq!(json["data"]["guidance_scale"], 6.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn model_switch_reclamps_the_stored_step_count(pool: PgPool) {
    seed_user(&pool, "u1").await;
    let token = token_for("u1");

    // Move to the full model at 30 steps.
    let response = send_json(
        common::build_test_app(pool.clone()),
        "PUT",
        "/api/v1/preferences",
        Some(&token),
        json!({ "model_type": "flux-dev", "inference_steps": 30 }),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["inference_steps"], 30);

    // Switching back to the fast model without touching steps re-clamps
    // 30 down to 4, it does not reset to the default.
    let response = send_json(
        common::build_test_app(pool.clone()),
        "PUT",
        "/api/v1/preferences",
        Some(&token),
        json!({ "model_type": "flux-schnell" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["model_type"], "flux-schnell");
    assert_eq!(json["data"]["inference_steps"], 4);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn low_step_count_on_full_model_rises_to_minimum(pool: PgPool) {
    seed_user(&pool, "u1").await;
    let app = common::build_test_app(pool);

    let response = send_json(
        app,
        "PUT",
        "/api/v1/preferences",
        Some(&token_for("u1")),
        json!({ "model_type": "flux-dev", "inference_steps": 4 }),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["inference_steps"], 18);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_model_type_is_rejected(pool: PgPool) {
    seed_user(&pool, "u1").await;
    let app = common::build_test_app(pool);

    let response = send_json(
        app,
        "PUT",
        "/api/v1/preferences",
        Some(&token_for("u1")),
        json!({ "model_type": "flux-pro" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}
