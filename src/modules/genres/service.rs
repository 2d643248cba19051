use sqlx::PgPool;
use tracing::instrument;

use crate::utils::errors::AppError;

use super::model::{CreateGenreDto, Genre, GenreFilterParams};

pub struct GenreService;

impl GenreService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        params: &GenreFilterParams,
    ) -> Result<(Vec<Genre>, i64), AppError> {
        let like = params.search.as_ref().map(|s| format!("%{}%", s));

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM genres WHERE ($1::text IS NULL OR name ILIKE $1)",
        )
        .bind(&like)
        .fetch_one(db)
        .await?;

        let genres = sqlx::query_as::<_, Genre>(
            "SELECT id, name, slug
             FROM genres
             WHERE ($1::text IS NULL OR name ILIKE $1)
             ORDER BY name
             LIMIT $2 OFFSET $3",
        )
        .bind(&like)
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok((genres, total))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateGenreDto) -> Result<Genre, AppError> {
        let inserted = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (name, slug)
             VALUES ($1, $2)
             RETURNING id, name, slug",
        )
        .bind(&dto.name)
        .bind(&dto.slug)
        .fetch_one(db)
        .await;

        match inserted {
            Ok(genre) => Ok(genre),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::conflict(format!("slug '{}' already exists", dto.slug)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes by slug. Join rows to titles cascade away; the titles
    /// themselves are untouched.
    #[instrument(skip(db))]
    pub async fn delete_by_slug(db: &PgPool, slug: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM genres WHERE slug = $1")
            .bind(slug)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Genre '{}' not found", slug)));
        }
        Ok(())
    }
}
