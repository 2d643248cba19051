use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(FromRow, Serialize, Debug, Clone, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub title_id: Uuid,
    #[serde(skip)]
    pub author_id: Uuid,
    /// Author's username, joined in at query time.
    pub author: String,
    pub text: String,
    pub score: i32,
    pub pub_date: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateReviewDto {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub text: String,
    #[validate(range(min = 1, max = 10, message = "must be between 1 and 10"))]
    pub score: i32,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateReviewDto {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub text: Option<String>,
    #[validate(range(min = 1, max = 10, message = "must be between 1 and 10"))]
    pub score: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewFilterParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedReviewsResponse {
    pub data: Vec<Review>,
    pub meta: PaginationMeta,
}
