mod common;

use chrono::{Duration, Utc};

use laurel::modules::users::model::Role;
use laurel::utils::confirmation::{generate_code, verify_code};

use common::{TEST_JWT_SECRET, test_user};

#[test]
fn issued_code_verifies() {
    let user = test_user(Role::User, false);
    let code = generate_code(TEST_JWT_SECRET, &user);
    assert!(verify_code(TEST_JWT_SECRET, &user, &code));
}

#[test]
fn code_is_stable_while_account_unchanged() {
    let user = test_user(Role::User, false);
    assert_eq!(
        generate_code(TEST_JWT_SECRET, &user),
        generate_code(TEST_JWT_SECRET, &user)
    );
}

#[test]
fn confirmation_invalidates_the_used_code() {
    let mut user = test_user(Role::User, false);
    user.confirmed_at = None;

    let code = generate_code(TEST_JWT_SECRET, &user);

    // Token exchange stamps confirmed_at and updated_at.
    user.confirmed_at = Some(Utc::now());
    user.updated_at = Utc::now();

    assert!(!verify_code(TEST_JWT_SECRET, &user, &code));
}

#[test]
fn profile_update_invalidates_outstanding_codes() {
    let mut user = test_user(Role::User, false);
    let code = generate_code(TEST_JWT_SECRET, &user);

    user.updated_at = user.updated_at + Duration::seconds(1);
    assert!(!verify_code(TEST_JWT_SECRET, &user, &code));
}

#[test]
fn code_is_bound_to_the_secret_and_identity() {
    let user = test_user(Role::User, false);
    let code = generate_code(TEST_JWT_SECRET, &user);

    assert!(!verify_code("some-other-secret", &user, &code));

    let mut renamed = user.clone();
    renamed.username = "someone-else".to_string();
    assert!(!verify_code(TEST_JWT_SECRET, &renamed, &code));
}

#[test]
fn garbage_codes_rejected() {
    let user = test_user(Role::User, false);
    assert!(!verify_code(TEST_JWT_SECRET, &user, ""));
    assert!(!verify_code(TEST_JWT_SECRET, &user, "0000000000000000"));
}
