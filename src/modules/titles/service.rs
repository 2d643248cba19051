use std::collections::HashMap;

use sqlx::{FromRow, PgConnection, PgPool};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::genres::model::Genre;
use crate::utils::errors::AppError;

use super::model::{CreateTitleDto, TitleFilterParams, TitleResponse, TitleRow, UpdateTitleDto};

/// Shared projection: the category join inlined, the rating computed from
/// reviews. Genres come from a second query to avoid row multiplication.
const SELECT_TITLE_ROWS: &str = "SELECT t.id, t.name, t.year, t.description,
        AVG(r.score)::float8 AS rating,
        c.id AS category_id, c.name AS category_name, c.slug AS category_slug
     FROM titles t
     LEFT JOIN categories c ON c.id = t.category_id
     LEFT JOIN reviews r ON r.title_id = t.id";

const GROUP_TITLE_ROWS: &str = "GROUP BY t.id, t.name, t.year, t.description, c.id, c.name, c.slug";

#[derive(FromRow)]
struct GenreLink {
    title_id: Uuid,
    id: Uuid,
    name: String,
    slug: String,
}

pub struct TitleService;

impl TitleService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        params: &TitleFilterParams,
    ) -> Result<(Vec<TitleResponse>, i64), AppError> {
        let like_name = params.name.as_ref().map(|s| format!("%{}%", s));

        let filter = "WHERE ($1::text IS NULL OR c.slug = $1)
               AND ($2::text IS NULL OR EXISTS (
                       SELECT 1 FROM title_genres tg
                       JOIN genres g ON g.id = tg.genre_id
                       WHERE tg.title_id = t.id AND g.slug = $2))
               AND ($3::int8 IS NULL OR t.year = $3)
               AND ($4::text IS NULL OR t.name ILIKE $4)";

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*)
             FROM titles t
             LEFT JOIN categories c ON c.id = t.category_id
             {filter}"
        ))
        .bind(&params.category)
        .bind(&params.genre)
        .bind(params.year)
        .bind(&like_name)
        .fetch_one(db)
        .await?;

        let rows = sqlx::query_as::<_, TitleRow>(&format!(
            "{SELECT_TITLE_ROWS}
             {filter}
             {GROUP_TITLE_ROWS}
             ORDER BY t.name
             LIMIT $5 OFFSET $6"
        ))
        .bind(&params.category)
        .bind(&params.genre)
        .bind(params.year)
        .bind(&like_name)
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(db)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut genres = Self::genres_for(db, &ids).await?;

        let titles = rows
            .into_iter()
            .map(|row| {
                let genre = genres.remove(&row.id).unwrap_or_default();
                row.into_response(genre)
            })
            .collect();

        Ok((titles, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<TitleResponse, AppError> {
        let row = sqlx::query_as::<_, TitleRow>(&format!(
            "{SELECT_TITLE_ROWS}
             WHERE t.id = $1
             {GROUP_TITLE_ROWS}"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Title not found"))?;

        let mut genres = Self::genres_for(db, &[id]).await?;
        let genre = genres.remove(&id).unwrap_or_default();
        Ok(row.into_response(genre))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateTitleDto) -> Result<TitleResponse, AppError> {
        let mut tx = db.begin().await?;

        let category_id = match &dto.category {
            Some(slug) => Some(Self::resolve_category(&mut *tx, slug).await?),
            None => None,
        };
        let genre_ids = Self::resolve_genres(&mut *tx, &dto.genre).await?;

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO titles (name, year, description, category_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&dto.name)
        .bind(dto.year)
        .bind(&dto.description)
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await?;

        Self::attach_genres(&mut *tx, id, &genre_ids).await?;
        tx.commit().await?;

        Self::get(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateTitleDto,
    ) -> Result<TitleResponse, AppError> {
        let mut tx = db.begin().await?;

        let exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM titles WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(AppError::not_found("Title not found"));
        }

        let category_id = match &dto.category {
            Some(slug) => Some(Self::resolve_category(&mut *tx, slug).await?),
            None => None,
        };

        sqlx::query(
            "UPDATE titles
             SET name = COALESCE($2, name),
                 year = COALESCE($3, year),
                 description = COALESCE($4, description),
                 category_id = COALESCE($5, category_id)
             WHERE id = $1",
        )
        .bind(id)
        .bind(&dto.name)
        .bind(dto.year)
        .bind(&dto.description)
        .bind(category_id)
        .execute(&mut *tx)
        .await?;

        if let Some(slugs) = &dto.genre {
            let genre_ids = Self::resolve_genres(&mut *tx, slugs).await?;
            sqlx::query("DELETE FROM title_genres WHERE title_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::attach_genres(&mut *tx, id, &genre_ids).await?;
        }

        tx.commit().await?;
        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM titles WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Title not found"));
        }
        Ok(())
    }

    /// Batch-fetches the genre lists for a set of titles.
    async fn genres_for(
        db: &PgPool,
        title_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Genre>>, AppError> {
        if title_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = sqlx::query_as::<_, GenreLink>(
            "SELECT tg.title_id, g.id, g.name, g.slug
             FROM title_genres tg
             JOIN genres g ON g.id = tg.genre_id
             WHERE tg.title_id = ANY($1)
             ORDER BY g.name",
        )
        .bind(title_ids)
        .fetch_all(db)
        .await?;

        let mut map: HashMap<Uuid, Vec<Genre>> = HashMap::new();
        for link in links {
            map.entry(link.title_id).or_default().push(Genre {
                id: link.id,
                name: link.name,
                slug: link.slug,
            });
        }
        Ok(map)
    }

    /// Unknown slugs in write payloads are a client error, not a 404.
    async fn resolve_category(conn: &mut PgConnection, slug: &str) -> Result<Uuid, AppError> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::bad_request(format!("category: unknown slug '{}'", slug)))
    }

    async fn resolve_genres(
        conn: &mut PgConnection,
        slugs: &[String],
    ) -> Result<Vec<Uuid>, AppError> {
        if slugs.is_empty() {
            return Ok(Vec::new());
        }

        #[derive(FromRow)]
        struct SlugId {
            id: Uuid,
            slug: String,
        }

        let found = sqlx::query_as::<_, SlugId>("SELECT id, slug FROM genres WHERE slug = ANY($1)")
            .bind(slugs)
            .fetch_all(&mut *conn)
            .await?;

        for slug in slugs {
            if !found.iter().any(|f| &f.slug == slug) {
                return Err(AppError::bad_request(format!(
                    "genre: unknown slug '{}'",
                    slug
                )));
            }
        }
        Ok(found.into_iter().map(|f| f.id).collect())
    }

    async fn attach_genres(
        conn: &mut PgConnection,
        title_id: Uuid,
        genre_ids: &[Uuid],
    ) -> Result<(), AppError> {
        for genre_id in genre_ids {
            sqlx::query(
                "INSERT INTO title_genres (title_id, genre_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(title_id)
            .bind(genre_id)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }
}
