use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::utils::validation::validate_slug;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 256, message = "must be between 1 and 256 characters"))]
    pub name: String,
    #[validate(
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        custom(function = validate_slug)
    )]
    pub slug: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryFilterParams {
    /// Substring match on name.
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCategoriesResponse {
    pub data: Vec<Category>,
    pub meta: PaginationMeta,
}
