//! HTTP-level integration tests for `/api/v1/franchise-inquiries`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_and_list_inquiry(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/franchise-inquiries",
        json!({
            "name": "Priya",
            "email": "priya@example.com",
            "city": "Bristol",
            "message": "We would love to open a branch.",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["city"], "Bristol");
    assert!(json["data"]["createdAt"].is_string());

    let response = get(build_test_app(pool), "/api/v1/franchise-inquiries?limit=5").await;
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["email"], "priya@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_email_is_rejected(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/franchise-inquiries",
        json!({ "name": "Priya", "email": "nope", "message": "Hello" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_field_is_rejected(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/franchise-inquiries",
        json!({ "name": "Priya", "email": "priya@example.com" }),
    )
    .await;
    assert!(response.status().is_client_error());
}
