use axum::{
    Router, middleware,
    routing::get,
};

use crate::middleware::permissions::require_admin;
use crate::state::AppState;

use super::controller::{
    create_user, delete_user, get_me, get_user, list_users, update_me, update_user,
};

/// `/me` only needs authentication; everything else is admin-gated.
pub fn init_users_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{username}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/me", get(get_me).patch(update_me))
        .merge(admin_routes)
}
