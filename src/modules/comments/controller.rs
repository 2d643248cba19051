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
    Comment, CommentFilterParams, CreateCommentDto, PaginatedCommentsResponse, UpdateCommentDto,
};
use super::service::CommentService;

/// List comments on a review (public)
#[utoipa::path(
    get,
    path = "/api/titles/{title_id}/reviews/{review_id}/comments",
    params(
        ("title_id" = Uuid, Path, description = "Title id"),
        ("review_id" = Uuid, Path, description = "Review id"),
        ("limit" = Option<i64>, Query, description = "Page size"),
        ("offset" = Option<i64>, Query, description = "Row offset"),
        ("page" = Option<i64>, Query, description = "Page number")
    ),
    responses(
        (status = 200, description = "Paginated list of comments", body = PaginatedCommentsResponse),
        (status = 404, description = "Unknown title or review", body = ErrorResponse)
    ),
    tag = "Comments"
)]
#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(Uuid, Uuid)>,
    Query(params): Query<CommentFilterParams>,
) -> Result<Json<PaginatedCommentsResponse>, AppError> {
    let (comments, total) = CommentService::list(&state.db, title_id, review_id, &params).await?;
    Ok(Json(PaginatedCommentsResponse {
        data: comments,
        meta: PaginationMeta::new(total, &params.pagination),
    }))
}

/// Fetch a single comment (public)
#[utoipa::path(
    get,
    path = "/api/titles/{title_id}/reviews/{review_id}/comments/{comment_id}",
    params(
        ("title_id" = Uuid, Path, description = "Title id"),
        ("review_id" = Uuid, Path, description = "Review id"),
        ("comment_id" = Uuid, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "The comment", body = Comment),
        (status = 404, description = "Unknown title, review or comment", body = ErrorResponse)
    ),
    tag = "Comments"
)]
#[instrument(skip(state))]
pub async fn get_comment(
    State(state): State<AppState>,
    Path((title_id, review_id, comment_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<Comment>, AppError> {
    let comment = CommentService::get(&state.db, title_id, review_id, comment_id).await?;
    Ok(Json(comment))
}

/// Post a comment (authenticated)
#[utoipa::path(
    post,
    path = "/api/titles/{title_id}/reviews/{review_id}/comments",
    params(
        ("title_id" = Uuid, Path, description = "Title id"),
        ("review_id" = Uuid, Path, description = "Review id")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Unknown title or review", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
#[instrument(skip(state, auth, dto))]
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((title_id, review_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let comment =
        CommentService::create(&state.db, title_id, review_id, auth.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Partially update a comment (author, moderator or admin)
#[utoipa::path(
    patch,
    path = "/api/titles/{title_id}/reviews/{review_id}/comments/{comment_id}",
    params(
        ("title_id" = Uuid, Path, description = "Title id"),
        ("review_id" = Uuid, Path, description = "Review id"),
        ("comment_id" = Uuid, Path, description = "Comment id")
    ),
    request_body = UpdateCommentDto,
    responses(
        (status = 200, description = "Updated comment", body = Comment),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not the author, a moderator or an admin", body = ErrorResponse),
        (status = 404, description = "Unknown title, review or comment", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
#[instrument(skip(state, auth, dto))]
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((title_id, review_id, comment_id)): Path<(Uuid, Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<UpdateCommentDto>,
) -> Result<Json<Comment>, AppError> {
    let existing = CommentService::get(&state.db, title_id, review_id, comment_id).await?;
    authorize_object(
        &IsAuthorOrAdminOrModeratorOrReadOnly,
        Some(&auth),
        &Method::PATCH,
        existing.author_id,
    )?;

    let comment =
        CommentService::update(&state.db, title_id, review_id, comment_id, dto).await?;
    Ok(Json(comment))
}

/// Delete a comment (author, moderator or admin)
#[utoipa::path(
    delete,
    path = "/api/titles/{title_id}/reviews/{review_id}/comments/{comment_id}",
    params(
        ("title_id" = Uuid, Path, description = "Title id"),
        ("review_id" = Uuid, Path, description = "Review id"),
        ("comment_id" = Uuid, Path, description = "Comment id")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not the author, a moderator or an admin", body = ErrorResponse),
        (status = 404, description = "Unknown title, review or comment", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
#[instrument(skip(state, auth))]
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((title_id, review_id, comment_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let existing = CommentService::get(&state.db, title_id, review_id, comment_id).await?;
    authorize_object(
        &IsAuthorOrAdminOrModeratorOrReadOnly,
        Some(&auth),
        &Method::DELETE,
        existing.author_id,
    )?;

    CommentService::delete(&state.db, review_id, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
