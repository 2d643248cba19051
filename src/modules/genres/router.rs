use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{create_genre, delete_genre, list_genres};

pub fn init_genres_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_genres).post(create_genre))
        .route("/{slug}", delete(delete_genre))
}
