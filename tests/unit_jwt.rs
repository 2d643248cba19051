mod common;

use laurel::modules::users::model::Role;
use laurel::utils::jwt::{create_access_token, verify_token};

use common::{bearer_token, test_jwt_config, test_user};

#[test]
fn test_create_access_token_success() {
    let user = test_user(Role::User, false);
    let token = create_access_token(&user, &test_jwt_config()).unwrap();
    assert!(!token.is_empty());
}

#[test]
fn test_token_round_trip_preserves_claims() {
    let config = test_jwt_config();
    let user = test_user(Role::Moderator, true);

    let token = create_access_token(&user, &config).unwrap();
    let claims = verify_token(&token, &config).unwrap();

    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.username, user.username);
    assert_eq!(claims.role, Role::Moderator);
    assert!(claims.is_superuser);
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_verify_token_invalid() {
    let result = verify_token("invalid.token.here", &test_jwt_config());
    assert!(result.is_err());
}

#[test]
fn test_verify_token_wrong_secret() {
    let token = bearer_token(Role::User);

    let mut other = test_jwt_config();
    other.secret = "a_different_secret_entirely".to_string();

    assert!(verify_token(&token, &other).is_err());
}

#[test]
fn test_tokens_created_for_all_roles() {
    let config = test_jwt_config();
    for role in [Role::User, Role::Moderator, Role::Admin] {
        let user = test_user(role, false);
        let token = create_access_token(&user, &config).unwrap();
        assert_eq!(verify_token(&token, &config).unwrap().role, role);
    }
}
