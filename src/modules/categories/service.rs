use sqlx::PgPool;
use tracing::instrument;

use crate::utils::errors::AppError;

use super::model::{Category, CategoryFilterParams, CreateCategoryDto};

pub struct CategoryService;

impl CategoryService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        params: &CategoryFilterParams,
    ) -> Result<(Vec<Category>, i64), AppError> {
        let like = params.search.as_ref().map(|s| format!("%{}%", s));

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM categories WHERE ($1::text IS NULL OR name ILIKE $1)",
        )
        .bind(&like)
        .fetch_one(db)
        .await?;

        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug
             FROM categories
             WHERE ($1::text IS NULL OR name ILIKE $1)
             ORDER BY name
             LIMIT $2 OFFSET $3",
        )
        .bind(&like)
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok((categories, total))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateCategoryDto) -> Result<Category, AppError> {
        let inserted = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, slug)
             VALUES ($1, $2)
             RETURNING id, name, slug",
        )
        .bind(&dto.name)
        .bind(&dto.slug)
        .fetch_one(db)
        .await;

        match inserted {
            Ok(category) => Ok(category),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::conflict(format!("slug '{}' already exists", dto.slug)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes by slug. Titles referencing the category keep existing;
    /// their reference is nulled by the FK's ON DELETE SET NULL.
    #[instrument(skip(db))]
    pub async fn delete_by_slug(db: &PgPool, slug: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE slug = $1")
            .bind(slug)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Category '{}' not found", slug)));
        }
        Ok(())
    }
}
