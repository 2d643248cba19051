use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;
use crate::validator::ValidatedJson;

use super::model::{CreateGenreDto, Genre, GenreFilterParams, PaginatedGenresResponse};
use super::service::GenreService;

/// List genres (public)
#[utoipa::path(
    get,
    path = "/api/genres",
    params(
        ("search" = Option<String>, Query, description = "Substring match on name"),
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Row offset"),
        ("page" = Option<i64>, Query, description = "Page number")
    ),
    responses(
        (status = 200, description = "Paginated list of genres", body = PaginatedGenresResponse)
    ),
    tag = "Genres"
)]
#[instrument(skip(state))]
pub async fn list_genres(
    State(state): State<AppState>,
    Query(params): Query<GenreFilterParams>,
) -> Result<Json<PaginatedGenresResponse>, AppError> {
    let (genres, total) = GenreService::list(&state.db, &params).await?;
    Ok(Json(PaginatedGenresResponse {
        data: genres,
        meta: PaginationMeta::new(total, &params.pagination),
    }))
}

/// Create a genre (admin only)
#[utoipa::path(
    post,
    path = "/api/genres",
    request_body = CreateGenreDto,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 409, description = "Slug already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
#[instrument(skip(state, dto))]
pub async fn create_genre(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateGenreDto>,
) -> Result<(StatusCode, Json<Genre>), AppError> {
    let genre = GenreService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

/// Delete a genre by slug (admin only)
#[utoipa::path(
    delete,
    path = "/api/genres/{slug}",
    params(("slug" = String, Path, description = "Genre slug")),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Unknown slug", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Genres"
)]
#[instrument(skip(state))]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    GenreService::delete_by_slug(&state.db, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
