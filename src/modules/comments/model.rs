use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(FromRow, Serialize, Debug, Clone, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub review_id: Uuid,
    #[serde(skip)]
    pub author_id: Uuid,
    /// Author's username, joined in at query time.
    pub author: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateCommentDto {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub text: String,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateCommentDto {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentFilterParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCommentsResponse {
    pub data: Vec<Comment>,
    pub meta: PaginationMeta,
}
