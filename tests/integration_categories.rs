mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use laurel::modules::users::model::Role;

use common::{
    app_with_pool, body_json, insert_category, insert_title, insert_user, send_empty, token_for,
};

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_referenced_category_detaches_its_titles(pool: PgPool) {
    let admin = insert_user(&pool, "admin-user", Role::Admin).await;
    let token = token_for(&admin);

    let category_id = insert_category(&pool, "Books", "books").await;
    let title_id = insert_title(&pool, "Dune", 1965, Some(category_id)).await;

    let response = send_empty(
        app_with_pool(pool.clone()),
        "GET",
        &format!("/api/titles/{}", title_id),
        None,
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["category"]["slug"], "books");

    let response = send_empty(
        app_with_pool(pool.clone()),
        "DELETE",
        "/api/categories/books",
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The title survives; its category reference is nulled.
    let response = send_empty(
        app_with_pool(pool.clone()),
        "GET",
        &format!("/api/titles/{}", title_id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["category"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_category_slug_conflicts(pool: PgPool) {
    let admin = insert_user(&pool, "admin-user", Role::Admin).await;
    let token = token_for(&admin);

    insert_category(&pool, "Books", "books").await;

    let response = common::send_json(
        app_with_pool(pool.clone()),
        "POST",
        "/api/categories",
        Some(&token),
        serde_json::json!({"name": "Paper Books", "slug": "books"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
