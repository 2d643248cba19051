//! Authorization behavior exercised through the full router. Every case
//! here is rejected before any query runs, so no database is needed.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use laurel::modules::users::model::Role;

use common::{bearer_token, send_empty, send_json, test_app};

#[tokio::test]
async fn user_list_requires_authentication() {
    let response = send_empty(test_app(), "GET", "/api/users", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_list_requires_admin() {
    for role in [Role::User, Role::Moderator] {
        let token = bearer_token(role);
        let response = send_empty(test_app(), "GET", "/api/users", Some(&token)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn profile_requires_authentication() {
    let response = send_empty(test_app(), "GET", "/api/users/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send_json(test_app(), "PATCH", "/api/users/me", None, json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn category_writes_are_admin_only() {
    let body = json!({"name": "Books", "slug": "books"});

    let response = send_json(test_app(), "POST", "/api/categories", None, body.clone()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    for role in [Role::User, Role::Moderator] {
        let token = bearer_token(role);
        let response =
            send_json(test_app(), "POST", "/api/categories", Some(&token), body.clone()).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn genre_delete_is_admin_only() {
    let token = bearer_token(Role::User);
    let response = send_empty(test_app(), "DELETE", "/api/genres/rock", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn title_writes_are_admin_only() {
    let token = bearer_token(Role::Moderator);
    let response = send_json(
        test_app(),
        "POST",
        "/api/titles",
        Some(&token),
        json!({"name": "Dune", "year": 1965}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn review_post_requires_authentication() {
    let response = send_json(
        test_app(),
        "POST",
        "/api/titles/6f2a2a6e-1fd6-4e2c-9c8e-56a9f00d6b2d/reviews",
        None,
        json!({"text": "great", "score": 9}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn comment_post_requires_authentication() {
    let response = send_json(
        test_app(),
        "POST",
        "/api/titles/6f2a2a6e-1fd6-4e2c-9c8e-56a9f00d6b2d/reviews/8b9f7c1a-52a0-4f54-9d14-3c2a1f0e9b77/comments",
        None,
        json!({"text": "agreed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_rejected_even_on_reads() {
    // A present-but-invalid token must never demote the caller to anonymous.
    let response = send_empty(
        test_app(),
        "GET",
        "/api/categories",
        Some("not-a-real-token"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_create_category_still_validates_payload() {
    let token = bearer_token(Role::Admin);

    // Missing slug fails before any query.
    let response = send_json(
        test_app(),
        "POST",
        "/api/categories",
        Some(&token),
        json!({"name": "Books"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Slug with spaces and uppercase fails validation.
    let response = send_json(
        test_app(),
        "POST",
        "/api/categories",
        Some(&token),
        json!({"name": "Books", "slug": "Not A Slug"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn review_score_validated_before_authorization_of_object() {
    let token = bearer_token(Role::User);
    let response = send_json(
        test_app(),
        "POST",
        "/api/titles/6f2a2a6e-1fd6-4e2c-9c8e-56a9f00d6b2d/reviews",
        Some(&token),
        json!({"text": "great", "score": 11}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
