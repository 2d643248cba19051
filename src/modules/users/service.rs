use sqlx::PgPool;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::utils::errors::AppError;

use super::model::{CreateUserDto, Role, UpdateProfileDto, UpdateUserDto, User, UserFilterParams};

/// Self-service role changes are only honored for actors that already hold
/// a privileged role; anything a plain user submits is discarded and the
/// stored role is kept. This is the structural guard against privilege
/// escalation through `/users/me`.
pub fn resolve_role_change(actor: &AuthUser, requested: Option<Role>, current: Role) -> Role {
    if actor.is_admin() || actor.is_moderator() {
        requested.unwrap_or(current)
    } else {
        current
    }
}

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, params: &UserFilterParams) -> Result<(Vec<User>, i64), AppError> {
        let like = params.search.as_ref().map(|s| format!("%{}%", s));

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE ($1::text IS NULL OR username ILIKE $1)",
        )
        .bind(&like)
        .fetch_one(db)
        .await?;

        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, bio, role, is_superuser, confirmed_at, created_at, updated_at
             FROM users
             WHERE ($1::text IS NULL OR username ILIKE $1)
             ORDER BY username
             LIMIT $2 OFFSET $3",
        )
        .bind(&like)
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(db)
        .await?;

        Ok((users, total))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let role = dto.role.unwrap_or_default();

        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, bio, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, email, bio, role, is_superuser, confirmed_at, created_at, updated_at",
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&dto.bio)
        .bind(role)
        .fetch_one(db)
        .await;

        match inserted {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::conflict("username or email already registered"))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(db))]
    pub async fn get_by_username(db: &PgPool, username: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, bio, role, is_superuser, confirmed_at, created_at, updated_at
             FROM users
             WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User '{}' not found", username)))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_by_username(
        db: &PgPool,
        username: &str,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let updated = sqlx::query_as::<_, User>(
            "UPDATE users
             SET email = COALESCE($2, email),
                 bio = COALESCE($3, bio),
                 role = COALESCE($4, role),
                 updated_at = now()
             WHERE username = $1
             RETURNING id, username, email, bio, role, is_superuser, confirmed_at, created_at, updated_at",
        )
        .bind(username)
        .bind(&dto.email)
        .bind(&dto.bio)
        .bind(dto.role)
        .fetch_optional(db)
        .await;

        match updated {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AppError::not_found(format!("User '{}' not found", username))),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::conflict("email already registered"))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(db))]
    pub async fn delete_by_username(db: &PgPool, username: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User '{}' not found", username)));
        }
        Ok(())
    }

    #[instrument(skip(db, dto))]
    pub async fn update_profile(
        db: &PgPool,
        actor: &AuthUser,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        let current = Self::get_by_username(db, actor.username()).await?;
        let role = resolve_role_change(actor, dto.role, current.role);

        let updated = sqlx::query_as::<_, User>(
            "UPDATE users
             SET email = COALESCE($2, email),
                 bio = COALESCE($3, bio),
                 role = $4,
                 updated_at = now()
             WHERE id = $1
             RETURNING id, username, email, bio, role, is_superuser, confirmed_at, created_at, updated_at",
        )
        .bind(current.id)
        .bind(&dto.email)
        .bind(&dto.bio)
        .bind(role)
        .fetch_one(db)
        .await;

        match updated {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::conflict("email already registered"))
            }
            Err(e) => Err(e.into()),
        }
    }
}
