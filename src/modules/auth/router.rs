use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{exchange_token, signup};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/token", post(exchange_token))
}
