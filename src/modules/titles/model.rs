use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::categories::model::Category;
use crate::modules::genres::model::Genre;
use crate::utils::pagination::{PaginationMeta, PaginationParams};

/// Flat row shape produced by the title queries: the category join is
/// inlined, the genre list is attached afterwards.
#[derive(FromRow, Debug, Clone)]
pub struct TitleRow {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
}

impl TitleRow {
    pub fn into_response(self, genre: Vec<Genre>) -> TitleResponse {
        let category = match (self.category_id, self.category_name, self.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(Category { id, name, slug }),
            _ => None,
        };
        TitleResponse {
            id: self.id,
            name: self.name,
            year: self.year,
            description: self.description,
            rating: self.rating,
            category,
            genre,
        }
    }
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct TitleResponse {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    /// Average review score; null until the first review lands.
    pub rating: Option<f64>,
    pub category: Option<Category>,
    pub genre: Vec<Genre>,
}

/// Write payloads reference the category and genres by slug; reads expand
/// them to full objects.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateTitleDto {
    #[validate(length(min = 1, max = 256, message = "must be between 1 and 256 characters"))]
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateTitleDto {
    #[validate(length(min = 1, max = 256, message = "must be between 1 and 256 characters"))]
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Replaces the full genre set when present.
    pub genre: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TitleFilterParams {
    /// Category slug.
    pub category: Option<String>,
    /// Genre slug.
    pub genre: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::utils::pagination::deserialize_optional_i64"
    )]
    pub year: Option<i64>,
    /// Substring match on name.
    pub name: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedTitlesResponse {
    pub data: Vec<TitleResponse>,
    pub meta: PaginationMeta,
}
