use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_review, delete_review, get_review, list_reviews, update_review};

/// Nested under `/titles/{title_id}/reviews`.
pub fn init_reviews_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route(
            "/{review_id}",
            get(get_review).patch(update_review).delete(delete_review),
        )
}
