mod common;

use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::json;

use common::{send_json, test_app};

async fn body_error(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    value["error"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn signup_rejects_missing_email() {
    let response = send_json(
        test_app(),
        "POST",
        "/api/auth/signup",
        None,
        json!({"username": "alice"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_error(response).await.contains("email"));
}

#[tokio::test]
async fn signup_rejects_invalid_email() {
    let response = send_json(
        test_app(),
        "POST",
        "/api/auth/signup",
        None,
        json!({"username": "alice", "email": "not-an-email"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_error(response).await.contains("email"));
}

#[tokio::test]
async fn signup_rejects_reserved_username_me() {
    let response = send_json(
        test_app(),
        "POST",
        "/api/auth/signup",
        None,
        json!({"username": "me", "email": "me@example.com"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_error(response).await.contains("reserved"));
}

#[tokio::test]
async fn signup_rejects_non_slug_username() {
    let response = send_json(
        test_app(),
        "POST",
        "/api/auth/signup",
        None,
        json!({"username": "alice smith!", "email": "alice@example.com"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn token_exchange_rejects_missing_code() {
    let response = send_json(
        test_app(),
        "POST",
        "/api/auth/token",
        None,
        json!({"username": "alice"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_error(response).await.contains("confirmation_code"));
}

#[tokio::test]
async fn signup_rejects_malformed_json() {
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
