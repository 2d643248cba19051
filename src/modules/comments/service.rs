use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{Comment, CommentFilterParams, CreateCommentDto, UpdateCommentDto};

const SELECT_COMMENT: &str = "SELECT c.id, c.review_id, c.author_id, u.username AS author,
        c.text, c.pub_date
     FROM comments c
     JOIN users u ON u.id = c.author_id";

pub struct CommentService;

impl CommentService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        title_id: Uuid,
        review_id: Uuid,
        params: &CommentFilterParams,
    ) -> Result<(Vec<Comment>, i64), AppError> {
        Self::ensure_review(db, title_id, review_id).await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE review_id = $1")
                .bind(review_id)
                .fetch_one(db)
                .await?;

        let comments = sqlx::query_as::<_, Comment>(&format!(
            "{SELECT_COMMENT}
             WHERE c.review_id = $1
             ORDER BY c.pub_date DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(review_id)
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok((comments, total))
    }

    #[instrument(skip(db))]
    pub async fn get(
        db: &PgPool,
        title_id: Uuid,
        review_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Comment, AppError> {
        Self::ensure_review(db, title_id, review_id).await?;

        sqlx::query_as::<_, Comment>(&format!(
            "{SELECT_COMMENT}
             WHERE c.id = $1 AND c.review_id = $2"
        ))
        .bind(comment_id)
        .bind(review_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Comment not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        title_id: Uuid,
        review_id: Uuid,
        author_id: Uuid,
        dto: CreateCommentDto,
    ) -> Result<Comment, AppError> {
        Self::ensure_review(db, title_id, review_id).await?;

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO comments (review_id, author_id, text)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(review_id)
        .bind(author_id)
        .bind(&dto.text)
        .fetch_one(db)
        .await?;

        Self::get(db, title_id, review_id, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        title_id: Uuid,
        review_id: Uuid,
        comment_id: Uuid,
        dto: UpdateCommentDto,
    ) -> Result<Comment, AppError> {
        let result = sqlx::query(
            "UPDATE comments
             SET text = COALESCE($3, text)
             WHERE id = $1 AND review_id = $2",
        )
        .bind(comment_id)
        .bind(review_id)
        .bind(&dto.text)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Comment not found"));
        }
        Self::get(db, title_id, review_id, comment_id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(
        db: &PgPool,
        review_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND review_id = $2")
            .bind(comment_id)
            .bind(review_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Comment not found"));
        }
        Ok(())
    }

    /// The review must exist under this exact title, otherwise the whole
    /// nested path is a 404.
    async fn ensure_review(db: &PgPool, title_id: Uuid, review_id: Uuid) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM reviews WHERE id = $1 AND title_id = $2",
        )
        .bind(review_id)
        .bind(title_id)
        .fetch_optional(db)
        .await?;

        if exists.is_none() {
            return Err(AppError::not_found("Review not found"));
        }
        Ok(())
    }
}
