use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateReviewDto, Review, ReviewFilterParams, UpdateReviewDto};

const SELECT_REVIEW: &str = "SELECT r.id, r.title_id, r.author_id, u.username AS author,
        r.text, r.score, r.pub_date
     FROM reviews r
     JOIN users u ON u.id = r.author_id";

pub struct ReviewService;

impl ReviewService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        title_id: Uuid,
        params: &ReviewFilterParams,
    ) -> Result<(Vec<Review>, i64), AppError> {
        Self::ensure_title(db, title_id).await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE title_id = $1")
                .bind(title_id)
                .fetch_one(db)
                .await?;

        let reviews = sqlx::query_as::<_, Review>(&format!(
            "{SELECT_REVIEW}
             WHERE r.title_id = $1
             ORDER BY r.pub_date DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(title_id)
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok((reviews, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, title_id: Uuid, review_id: Uuid) -> Result<Review, AppError> {
        sqlx::query_as::<_, Review>(&format!(
            "{SELECT_REVIEW}
             WHERE r.id = $1 AND r.title_id = $2"
        ))
        .bind(review_id)
        .bind(title_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Review not found"))
    }

    /// One review per (title, author); the unique constraint backs this up.
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        title_id: Uuid,
        author_id: Uuid,
        dto: CreateReviewDto,
    ) -> Result<Review, AppError> {
        Self::ensure_title(db, title_id).await?;

        let inserted = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO reviews (title_id, author_id, text, score)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(title_id)
        .bind(author_id)
        .bind(&dto.text)
        .bind(dto.score)
        .fetch_one(db)
        .await;

        match inserted {
            Ok(id) => Self::get(db, title_id, id).await,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::conflict("You have already reviewed this title"),
            ),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        title_id: Uuid,
        review_id: Uuid,
        dto: UpdateReviewDto,
    ) -> Result<Review, AppError> {
        let result = sqlx::query(
            "UPDATE reviews
             SET text = COALESCE($3, text),
                 score = COALESCE($4, score)
             WHERE id = $1 AND title_id = $2",
        )
        .bind(review_id)
        .bind(title_id)
        .bind(&dto.text)
        .bind(dto.score)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Review not found"));
        }
        Self::get(db, title_id, review_id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, title_id: Uuid, review_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND title_id = $2")
            .bind(review_id)
            .bind(title_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Review not found"));
        }
        Ok(())
    }

    async fn ensure_title(db: &PgPool, title_id: Uuid) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM titles WHERE id = $1")
            .bind(title_id)
            .fetch_optional(db)
            .await?;
        if exists.is_none() {
            return Err(AppError::not_found("Title not found"));
        }
        Ok(())
    }
}
