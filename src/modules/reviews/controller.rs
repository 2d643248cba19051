use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::permissions::{IsAuthorOrAdminOrModeratorOrReadOnly, authorize_object};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;
use crate::validator::ValidatedJson;

use super::model::{
    CreateReviewDto, PaginatedReviewsResponse, Review, ReviewFilterParams, UpdateReviewDto,
};
use super::service::ReviewService;

/// List reviews for a title (public)
#[utoipa::path(
    get,
    path = "/api/titles/{title_id}/reviews",
    params(
        ("title_id" = Uuid, Path, description = "Title id"),
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Row offset"),
        ("page" = Option<i64>, Query, description = "Page number")
    ),
    responses(
        (status = 200, description = "Paginated list of reviews", body = PaginatedReviewsResponse),
        (status = 404, description = "Unknown title", body = ErrorResponse)
    ),
    tag = "Reviews"
)]
#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(title_id): Path<Uuid>,
    Query(params): Query<ReviewFilterParams>,
) -> Result<Json<PaginatedReviewsResponse>, AppError> {
    let (reviews, total) = ReviewService::list(&state.db, title_id, &params).await?;
    Ok(Json(PaginatedReviewsResponse {
        data: reviews,
        meta: PaginationMeta::new(total, &params.pagination),
    }))
}

/// Fetch a single review (public)
#[utoipa::path(
    get,
    path = "/api/titles/{title_id}/reviews/{review_id}",
    params(
        ("title_id" = Uuid, Path, description = "Title id"),
        ("review_id" = Uuid, Path, description = "Review id")
    ),
    responses(
        (status = 200, description = "The review", body = Review),
        (status = 404, description = "Unknown title or review", body = ErrorResponse)
    ),
    tag = "Reviews"
)]
#[instrument(skip(state))]
pub async fn get_review(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Review>, AppError> {
    let review = ReviewService::get(&state.db, title_id, review_id).await?;
    Ok(Json(review))
}

/// Post a review (authenticated, one per title per author)
#[utoipa::path(
    post,
    path = "/api/titles/{title_id}/reviews",
    params(("title_id" = Uuid, Path, description = "Title id")),
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Unknown title", body = ErrorResponse),
        (status = 409, description = "Author already reviewed this title", body = ErrorResponse),
        (status = 422, description = "Score out of range", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
#[instrument(skip(state, auth, dto))]
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(title_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateReviewDto>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let review = ReviewService::create(&state.db, title_id, auth.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Partially update a review (author, moderator or admin)
#[utoipa::path(
    patch,
    path = "/api/titles/{title_id}/reviews/{review_id}",
    params(
        ("title_id" = Uuid, Path, description = "Title id"),
        ("review_id" = Uuid, Path, description = "Review id")
    ),
    request_body = UpdateReviewDto,
    responses(
        (status = 200, description = "Updated review", body = Review),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not the author, a moderator or an admin", body = ErrorResponse),
        (status = 404, description = "Unknown title or review", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
#[instrument(skip(state, auth, dto))]
pub async fn update_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((title_id, review_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<UpdateReviewDto>,
) -> Result<Json<Review>, AppError> {
    let existing = ReviewService::get(&state.db, title_id, review_id).await?;
    authorize_object(
        &IsAuthorOrAdminOrModeratorOrReadOnly,
        Some(&auth),
        &Method::PATCH,
        existing.author_id,
    )?;

    let review = ReviewService::update(&state.db, title_id, review_id, dto).await?;
    Ok(Json(review))
}

/// Delete a review (author, moderator or admin)
#[utoipa::path(
    delete,
    path = "/api/titles/{title_id}/reviews/{review_id}",
    params(
        ("title_id" = Uuid, Path, description = "Title id"),
        ("review_id" = Uuid, Path, description = "Review id")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not the author, a moderator or an admin", body = ErrorResponse),
        (status = 404, description = "Unknown title or review", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
#[instrument(skip(state, auth))]
pub async fn delete_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((title_id, review_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let existing = ReviewService::get(&state.db, title_id, review_id).await?;
    authorize_object(
        &IsAuthorOrAdminOrModeratorOrReadOnly,
        Some(&auth),
        &Method::DELETE,
        existing.author_id,
    )?;

    ReviewService::delete(&state.db, title_id, review_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
