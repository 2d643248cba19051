use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;
use crate::validator::ValidatedJson;

use super::model::{
    CreateTitleDto, PaginatedTitlesResponse, TitleFilterParams, TitleResponse, UpdateTitleDto,
};
use super::service::TitleService;

/// List titles with filters (public)
#[utoipa::path(
    get,
    path = "/api/titles",
    params(
        ("category" = Option<String>, Query, description = "Category slug"),
        ("genre" = Option<String>, Query, description = "Genre slug"),
        ("year" = Option<i64>, Query, description = "Exact publication year"),
        ("name" = Option<String>, Query, description = "Substring match on name"),
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Row offset"),
        ("page" = Option<i64>, Query, description = "Page number")
    ),
    responses(
        (status = 200, description = "Paginated list of titles", body = PaginatedTitlesResponse)
    ),
    tag = "Titles"
)]
#[instrument(skip(state))]
pub async fn list_titles(
    State(state): State<AppState>,
    Query(params): Query<TitleFilterParams>,
) -> Result<Json<PaginatedTitlesResponse>, AppError> {
    let (titles, total) = TitleService::list(&state.db, &params).await?;
    Ok(Json(PaginatedTitlesResponse {
        data: titles,
        meta: PaginationMeta::new(total, &params.pagination),
    }))
}

/// Fetch a single title (public)
#[utoipa::path(
    get,
    path = "/api/titles/{title_id}",
    params(("title_id" = Uuid, Path, description = "Title id")),
    responses(
        (status = 200, description = "The title", body = TitleResponse),
        (status = 404, description = "Unknown title", body = ErrorResponse)
    ),
    tag = "Titles"
)]
#[instrument(skip(state))]
pub async fn get_title(
    State(state): State<AppState>,
    Path(title_id): Path<Uuid>,
) -> Result<Json<TitleResponse>, AppError> {
    let title = TitleService::get(&state.db, title_id).await?;
    Ok(Json(title))
}

/// Create a title (admin only)
#[utoipa::path(
    post,
    path = "/api/titles",
    request_body = CreateTitleDto,
    responses(
        (status = 201, description = "Title created", body = TitleResponse),
        (status = 400, description = "Unknown category or genre slug", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Titles"
)]
#[instrument(skip(state, dto))]
pub async fn create_title(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTitleDto>,
) -> Result<(StatusCode, Json<TitleResponse>), AppError> {
    let title = TitleService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(title)))
}

/// Partially update a title (admin only)
#[utoipa::path(
    patch,
    path = "/api/titles/{title_id}",
    params(("title_id" = Uuid, Path, description = "Title id")),
    request_body = UpdateTitleDto,
    responses(
        (status = 200, description = "Updated title", body = TitleResponse),
        (status = 400, description = "Unknown category or genre slug", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Unknown title", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Titles"
)]
#[instrument(skip(state, dto))]
pub async fn update_title(
    State(state): State<AppState>,
    Path(title_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTitleDto>,
) -> Result<Json<TitleResponse>, AppError> {
    let title = TitleService::update(&state.db, title_id, dto).await?;
    Ok(Json(title))
}

/// Delete a title (admin only)
#[utoipa::path(
    delete,
    path = "/api/titles/{title_id}",
    params(("title_id" = Uuid, Path, description = "Title id")),
    responses(
        (status = 204, description = "Title deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Unknown title", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Titles"
)]
#[instrument(skip(state))]
pub async fn delete_title(
    State(state): State<AppState>,
    Path(title_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    TitleService::delete(&state.db, title_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
