use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::modules::auth::model::Claims;
use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer token and exposes the caller's
/// claims. Rejects with 401 when the header is missing or the token does
/// not verify.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }

    /// Derived flag: role admin, or the platform superuser bit.
    pub fn is_admin(&self) -> bool {
        self.0.role == Role::Admin || self.0.is_superuser
    }

    /// Derived flag: role moderator, or the platform superuser bit.
    pub fn is_moderator(&self) -> bool {
        self.0.role == Role::Moderator || self.0.is_superuser
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Like [`AuthUser`], but resolves to `None` when no authorization header
/// is present. A header that is present but invalid still rejects; a
/// garbage token must not silently demote the caller to anonymous.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if parts.headers.get(header::AUTHORIZATION).is_none() {
            return Ok(OptionalAuthUser(None));
        }

        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        Ok(OptionalAuthUser(Some(auth_user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role, is_superuser: bool) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            username: "test".to_string(),
            role,
            is_superuser,
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn superuser_counts_as_admin_and_moderator() {
        let user = AuthUser(claims(Role::User, true));
        assert!(user.is_admin());
        assert!(user.is_moderator());
    }

    #[test]
    fn plain_roles_do_not_cross_over() {
        let admin = AuthUser(claims(Role::Admin, false));
        assert!(admin.is_admin());
        assert!(!admin.is_moderator());

        let moderator = AuthUser(claims(Role::Moderator, false));
        assert!(!moderator.is_admin());
        assert!(moderator.is_moderator());
    }

    #[test]
    fn user_id_parses_sub() {
        let id = Uuid::new_v4();
        let mut c = claims(Role::User, false);
        c.sub = id.to_string();
        assert_eq!(AuthUser(c).user_id().unwrap(), id);

        let mut bad = claims(Role::User, false);
        bad.sub = "not-a-uuid".to_string();
        assert!(AuthUser(bad).user_id().is_err());
    }
}
