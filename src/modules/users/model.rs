//! User entity, role enum, and user-management DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::pagination::{PaginationMeta, PaginationParams};

/// Authorization tier attached to every account.
///
/// Stored as the Postgres enum `user_role`. Note that `is_superuser` is a
/// separate platform flag; the derived admin/moderator checks live on
/// [`crate::middleware::auth::AuthUser`], which is where authorization
/// decisions are made.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Moderator,
    Admin,
}

/// A registered account.
///
/// `confirmed_at` is stamped on every successful token exchange and,
/// together with `updated_at`, feeds the confirmation-code digest so that
/// previously issued codes stop verifying once either changes.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub role: Role,
    pub is_superuser: bool,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public representation of a user returned by the API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            bio: user.bio,
            role: user.role,
        }
    }
}

/// Usernames must be slug-safe and must not shadow the `/users/me` route.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username == "me" {
        let mut err = ValidationError::new("reserved_username");
        err.message = Some("this username is reserved".into());
        return Err(err);
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        let mut err = ValidationError::new("invalid_username");
        err.message =
            Some("username may only contain letters, digits, hyphens and underscores".into());
        return Err(err);
    }
    Ok(())
}

/// DTO for admin user creation.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(
        length(min = 1, max = 150, message = "must be between 1 and 150 characters"),
        custom(function = validate_username)
    )]
    pub username: String,
    #[validate(
        email(message = "must be a valid email address"),
        length(max = 254, message = "must be at most 254 characters")
    )]
    pub email: String,
    pub bio: Option<String>,
    pub role: Option<Role>,
}

/// DTO for admin user updates. All fields optional; omitted fields keep
/// their stored value.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(
        email(message = "must be a valid email address"),
        length(max = 254, message = "must be at most 254 characters")
    )]
    pub email: Option<String>,
    pub bio: Option<String>,
    pub role: Option<Role>,
}

/// DTO for `/users/me` self-service updates. Carries the same shape as
/// [`UpdateUserDto`]; the role restriction is applied in the service.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(
        email(message = "must be a valid email address"),
        length(max = 254, message = "must be at most 254 characters")
    )]
    pub email: Option<String>,
    pub bio: Option<String>,
    pub role: Option<Role>,
}

/// Query parameters for listing users.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UserFilterParams {
    /// Substring match on username.
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<UserResponse>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_me_is_reserved() {
        assert!(validate_username("me").is_err());
        assert!(validate_username("me2").is_ok());
    }

    #[test]
    fn username_must_be_slug_safe() {
        assert!(validate_username("alice-bob_01").is_ok());
        assert!(validate_username("alice bob").is_err());
        assert!(validate_username("alice!").is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        assert_eq!(
            serde_json::from_str::<Role>(r#""moderator""#).unwrap(),
            Role::Moderator
        );
    }
}
