//! Confirmation-code derivation.
//!
//! Codes are never stored. A code is a keyed digest over the user's
//! identity plus the mutable parts of the row (`updated_at`,
//! `confirmed_at`). Verification recomputes the digest from the current
//! row, so any profile change or a completed token exchange invalidates
//! every previously issued code. A leaked code therefore cannot be
//! replayed once the account moves on.

use sha2::{Digest, Sha256};

use crate::modules::users::model::User;

const CODE_BYTES: usize = 16;

pub fn generate_code(secret: &str, user: &User) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(user.id.as_bytes());
    hasher.update(user.username.as_bytes());
    hasher.update(user.email.as_bytes());
    hasher.update(user.updated_at.timestamp_micros().to_be_bytes());
    match user.confirmed_at {
        Some(ts) => hasher.update(ts.timestamp_micros().to_be_bytes()),
        None => hasher.update(b"unconfirmed"),
    }
    hex::encode(&hasher.finalize()[..CODE_BYTES])
}

pub fn verify_code(secret: &str, user: &User, code: &str) -> bool {
    let expected = generate_code(secret, user);
    constant_time_eq(expected.as_bytes(), code.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::users::model::Role;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            bio: None,
            role: Role::User,
            is_superuser: false,
            confirmed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn code_is_deterministic_for_unchanged_state() {
        let user = test_user();
        assert_eq!(generate_code("secret", &user), generate_code("secret", &user));
    }

    #[test]
    fn code_verifies_against_same_state() {
        let user = test_user();
        let code = generate_code("secret", &user);
        assert!(verify_code("secret", &user, &code));
    }

    #[test]
    fn code_invalidated_by_confirmation() {
        let mut user = test_user();
        let code = generate_code("secret", &user);

        user.confirmed_at = Some(Utc::now());
        assert!(!verify_code("secret", &user, &code));
    }

    #[test]
    fn code_invalidated_by_profile_update() {
        let mut user = test_user();
        let code = generate_code("secret", &user);

        user.updated_at = user.updated_at + Duration::seconds(1);
        assert!(!verify_code("secret", &user, &code));
    }

    #[test]
    fn code_depends_on_secret() {
        let user = test_user();
        let code = generate_code("secret", &user);
        assert!(!verify_code("other-secret", &user, &code));
    }

    #[test]
    fn wrong_code_rejected() {
        let user = test_user();
        assert!(!verify_code("secret", &user, "deadbeef"));
        assert!(!verify_code("secret", &user, ""));
    }
}
