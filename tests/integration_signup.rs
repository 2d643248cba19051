mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use laurel::utils::confirmation::generate_code;

use common::{TEST_JWT_SECRET, app_with_pool, body_json, fetch_user, send_json};

async fn signup(pool: &PgPool, username: &str, email: &str) -> StatusCode {
    let response = send_json(
        app_with_pool(pool.clone()),
        "POST",
        "/api/auth/signup",
        None,
        json!({"username": username, "email": email}),
    )
    .await;
    response.status()
}

async fn exchange(pool: &PgPool, username: &str, code: &str) -> (StatusCode, serde_json::Value) {
    let response = send_json(
        app_with_pool(pool.clone()),
        "POST",
        "/api/auth/token",
        None,
        json!({"username": username, "confirmation_code": code}),
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

#[sqlx::test(migrations = "./migrations")]
async fn signup_then_token_exchange_issues_a_jwt(pool: PgPool) {
    assert_eq!(signup(&pool, "alice", "alice@example.com").await, StatusCode::OK);

    // The code only travels by email; derive it from the stored row the
    // same way the server does.
    let user = fetch_user(&pool, "alice").await;
    assert!(user.confirmed_at.is_none());
    let code = generate_code(TEST_JWT_SECRET, &user);

    let (status, body) = exchange(&pool, "alice", &code).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["token"].as_str().unwrap().is_empty());

    let user = fetch_user(&pool, "alice").await;
    assert!(user.confirmed_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn exchange_invalidates_the_used_code(pool: PgPool) {
    assert_eq!(signup(&pool, "alice", "alice@example.com").await, StatusCode::OK);

    let code = generate_code(TEST_JWT_SECRET, &fetch_user(&pool, "alice").await);
    let (status, _) = exchange(&pool, "alice", &code).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = exchange(&pool, "alice", &code).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("confirmation code"));
}

#[sqlx::test(migrations = "./migrations")]
async fn confirmed_account_can_re_signup_for_a_fresh_code(pool: PgPool) {
    assert_eq!(signup(&pool, "alice", "alice@example.com").await, StatusCode::OK);

    let code = generate_code(TEST_JWT_SECRET, &fetch_user(&pool, "alice").await);
    let (status, _) = exchange(&pool, "alice", &code).await;
    assert_eq!(status, StatusCode::OK);

    // Once the issued token expires the only way back in is to sign up
    // again with the same identity and exchange the fresh code.
    assert_eq!(signup(&pool, "alice", "alice@example.com").await, StatusCode::OK);

    let code = generate_code(TEST_JWT_SECRET, &fetch_user(&pool, "alice").await);
    let (status, body) = exchange(&pool, "alice", &code).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn signup_rejects_partial_identity_collisions(pool: PgPool) {
    assert_eq!(signup(&pool, "alice", "alice@example.com").await, StatusCode::OK);

    // Same username, different email.
    assert_eq!(
        signup(&pool, "alice", "other@example.com").await,
        StatusCode::BAD_REQUEST
    );
    // Same email, different username.
    assert_eq!(
        signup(&pool, "bob", "alice@example.com").await,
        StatusCode::BAD_REQUEST
    );
}
