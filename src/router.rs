use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::permissions::{admin_or_read_only, authenticated_or_read_only};
use crate::modules::auth::router::init_auth_router;
use crate::modules::categories::router::init_categories_router;
use crate::modules::comments::router::init_comments_router;
use crate::modules::genres::router::init_genres_router;
use crate::modules::reviews::router::init_reviews_router;
use crate::modules::titles::router::init_titles_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

/// Assembles the full application router. Each resource family carries its
/// own coarse policy layer; object-scoped checks live in the handlers.
pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/users", init_users_router(state.clone()))
                .nest(
                    "/categories",
                    init_categories_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        admin_or_read_only,
                    )),
                )
                .nest(
                    "/genres",
                    init_genres_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        admin_or_read_only,
                    )),
                )
                .nest(
                    "/titles",
                    init_titles_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        admin_or_read_only,
                    )),
                )
                .nest(
                    "/titles/{title_id}/reviews",
                    init_reviews_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        authenticated_or_read_only,
                    )),
                )
                .nest(
                    "/titles/{title_id}/reviews/{review_id}/comments",
                    init_comments_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        authenticated_or_read_only,
                    )),
                ),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
