use sqlx::PgPool;
use tracing::instrument;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::User;
use crate::utils::confirmation;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;

use super::model::{SignupRequest, TokenRequest, TokenResponse};

pub struct AuthService;

impl AuthService {
    /// Registers a pending account and derives its confirmation code.
    ///
    /// Re-submitting the identical (username, email) pair is idempotent
    /// and re-derives the current code, whether or not the account has
    /// completed a token exchange yet; an expired access token is
    /// recovered from by signing up again and exchanging the fresh code.
    /// A collision on either field alone is rejected with a field-level
    /// error. The unique constraints on `username` and `email` backstop
    /// the pre-check under concurrent identical submissions.
    #[instrument(skip(db, secret))]
    pub async fn signup(
        db: &PgPool,
        secret: &str,
        dto: SignupRequest,
    ) -> Result<(User, String), AppError> {
        let existing = sqlx::query_as::<_, User>(
            "SELECT id, username, email, bio, role, is_superuser, confirmed_at, created_at, updated_at
             FROM users
             WHERE username = $1 OR email = $2",
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .fetch_all(db)
        .await?;

        let matching_pair = existing
            .iter()
            .find(|u| u.username == dto.username && u.email == dto.email);

        let user = match matching_pair {
            Some(user) => user.clone(),
            None => {
                if existing.iter().any(|u| u.username == dto.username) {
                    return Err(AppError::bad_request("username: already taken"));
                }
                if existing.iter().any(|u| u.email == dto.email) {
                    return Err(AppError::bad_request("email: already registered"));
                }

                let inserted = sqlx::query_as::<_, User>(
                    "INSERT INTO users (username, email)
                     VALUES ($1, $2)
                     RETURNING id, username, email, bio, role, is_superuser, confirmed_at, created_at, updated_at",
                )
                .bind(&dto.username)
                .bind(&dto.email)
                .fetch_one(db)
                .await;

                match inserted {
                    Ok(user) => user,
                    Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                        return Err(AppError::conflict("username or email already registered"));
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        };

        let code = confirmation::generate_code(secret, &user);
        Ok((user, code))
    }

    /// Exchanges a username + confirmation code for a signed access token.
    ///
    /// On success the account's `confirmed_at` is stamped, which
    /// invalidates the code that was just used.
    #[instrument(skip(db, jwt_config, dto))]
    pub async fn exchange_token(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: TokenRequest,
    ) -> Result<TokenResponse, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, bio, role, is_superuser, confirmed_at, created_at, updated_at
             FROM users
             WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        if !confirmation::verify_code(&jwt_config.secret, &user, &dto.confirmation_code) {
            return Err(AppError::bad_request("Invalid confirmation code"));
        }

        let user = sqlx::query_as::<_, User>(
            "UPDATE users
             SET confirmed_at = now(), updated_at = now()
             WHERE id = $1
             RETURNING id, username, email, bio, role, is_superuser, confirmed_at, created_at, updated_at",
        )
        .bind(user.id)
        .fetch_one(db)
        .await?;

        let token = create_access_token(&user, jwt_config)?;
        Ok(TokenResponse { token })
    }
}
