use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_comment, delete_comment, get_comment, list_comments, update_comment,
};

/// Nested under `/titles/{title_id}/reviews/{review_id}/comments`.
pub fn init_comments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_comments).post(create_comment))
        .route(
            "/{comment_id}",
            get(get_comment).patch(update_comment).delete(delete_comment),
        )
}
