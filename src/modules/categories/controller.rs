use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;
use crate::validator::ValidatedJson;

use super::model::{Category, CategoryFilterParams, CreateCategoryDto, PaginatedCategoriesResponse};
use super::service::CategoryService;

/// List categories (public)
#[utoipa::path(
    get,
    path = "/api/categories",
    params(
        ("search" = Option<String>, Query, description = "Substring match on name"),
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Row offset"),
        ("page" = Option<i64>, Query, description = "Page number")
    ),
    responses(
        (status = 200, description = "Paginated list of categories", body = PaginatedCategoriesResponse)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryFilterParams>,
) -> Result<Json<PaginatedCategoriesResponse>, AppError> {
    let (categories, total) = CategoryService::list(&state.db, &params).await?;
    Ok(Json(PaginatedCategoriesResponse {
        data: categories,
        meta: PaginationMeta::new(total, &params.pagination),
    }))
}

/// Create a category (admin only)
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 409, description = "Slug already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
#[instrument(skip(state, dto))]
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = CategoryService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Delete a category by slug (admin only)
///
/// Titles referencing the category are detached, not deleted.
#[utoipa::path(
    delete,
    path = "/api/categories/{slug}",
    params(("slug" = String, Path, description = "Category slug")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Unknown slug", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    CategoryService::delete_by_slug(&state.db, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
