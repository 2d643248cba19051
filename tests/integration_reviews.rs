mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use laurel::modules::users::model::Role;

use common::{app_with_pool, body_json, insert_title, insert_user, send_json, token_for};

#[sqlx::test(migrations = "./migrations")]
async fn second_review_by_same_author_conflicts(pool: PgPool) {
    let author = insert_user(&pool, "reader", Role::User).await;
    let token = token_for(&author);
    let title_id = insert_title(&pool, "Dune", 1965, None).await;
    let uri = format!("/api/titles/{}/reviews", title_id);

    let response = send_json(
        app_with_pool(pool.clone()),
        "POST",
        &uri,
        Some(&token),
        json!({"text": "great", "score": 9}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send_json(
        app_with_pool(pool.clone()),
        "POST",
        &uri,
        Some(&token),
        json!({"text": "changed my mind", "score": 4}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("already reviewed"));

    // A different author is still free to review the same title.
    let other = insert_user(&pool, "other-reader", Role::User).await;
    let response = send_json(
        app_with_pool(pool.clone()),
        "POST",
        &uri,
        Some(&token_for(&other)),
        json!({"text": "fine", "score": 7}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "./migrations")]
async fn review_scores_feed_the_title_rating(pool: PgPool) {
    let title_id = insert_title(&pool, "Dune", 1965, None).await;

    for (name, score) in [("first", 6), ("second", 8)] {
        let user = insert_user(&pool, name, Role::User).await;
        let response = send_json(
            app_with_pool(pool.clone()),
            "POST",
            &format!("/api/titles/{}/reviews", title_id),
            Some(&token_for(&user)),
            json!({"text": "review", "score": score}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = common::send_empty(
        app_with_pool(pool.clone()),
        "GET",
        &format!("/api/titles/{}", title_id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["rating"].as_f64().unwrap(), 7.0);
}
