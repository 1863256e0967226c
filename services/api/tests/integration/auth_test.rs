use palisade_api::error::ApiError;
use palisade_api::usecase::auth::{
    LoginInput, LoginMeta, LoginUseCase, RegisterInput, RegisterUseCase,
};
use palisade_auth::password;
use palisade_auth::token::verify_token;
use palisade_domain::role::Role;

use crate::helpers::{
    MockLoginRepo, MockUserRepo, TEST_JWT_SECRET, admin_user, login_store, member_user, test_keys,
};

// ── RegisterUseCase ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_user_with_default_role() {
    let mock_users = MockUserRepo::empty();
    let users_handle = mock_users.users_handle();

    let uc = RegisterUseCase { users: mock_users };
    let user = uc
        .execute(RegisterInput {
            username: "carol".to_owned(),
            email: "carol@example.com".to_owned(),
            password: "hunter2".to_owned(),
            full_name: Some("Carol Jones".to_owned()),
            role: None,
        })
        .await
        .unwrap();

    assert_eq!(user.username, "carol");
    assert_eq!(user.role, "user", "absent role should default to user");
    assert!(
        password::verify_password("hunter2", &user.password_hash).unwrap(),
        "stored digest should verify against the submitted password"
    );

    let users = users_handle.lock().unwrap();
    assert_eq!(users.len(), 1, "expected exactly one user to be created");
    assert_eq!(users[0].id, user.id);
}

#[tokio::test]
async fn should_register_user_with_explicit_role() {
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
    };

    let user = uc
        .execute(RegisterInput {
            username: "root".to_owned(),
            email: "root@example.com".to_owned(),
            password: "hunter2".to_owned(),
            full_name: None,
            role: Some("admin".to_owned()),
        })
        .await
        .unwrap();

    assert_eq!(user.role, "admin");
}

#[tokio::test]
async fn should_treat_empty_role_as_default() {
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
    };

    let user = uc
        .execute(RegisterInput {
            username: "carol".to_owned(),
            email: "carol@example.com".to_owned(),
            password: "hunter2".to_owned(),
            full_name: None,
            role: Some(String::new()),
        })
        .await
        .unwrap();

    assert_eq!(user.role, "user");
}

#[tokio::test]
async fn should_reject_duplicate_username_at_registration() {
    let uc = RegisterUseCase {
        users: MockUserRepo::new(vec![member_user()], login_store(vec![])),
    };

    let result = uc
        .execute(RegisterInput {
            username: "alice".to_owned(),
            email: "other@example.com".to_owned(),
            password: "hunter2".to_owned(),
            full_name: None,
            role: None,
        })
        .await;

    assert!(
        matches!(result, Err(ApiError::DuplicateUsername)),
        "expected DuplicateUsername, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_duplicate_email_at_registration() {
    let uc = RegisterUseCase {
        users: MockUserRepo::new(vec![member_user()], login_store(vec![])),
    };

    let result = uc
        .execute(RegisterInput {
            username: "other".to_owned(),
            email: "alice@example.com".to_owned(),
            password: "hunter2".to_owned(),
            full_name: None,
            role: None,
        })
        .await;

    assert!(
        matches!(result, Err(ApiError::DuplicateEmail)),
        "expected DuplicateEmail, got {result:?}"
    );
}

// ── LoginUseCase ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_with_username_and_record_event() {
    let mut user = member_user();
    user.password_hash = password::hash_password("hunter2").unwrap();

    let logins = login_store(vec![]);
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user.clone()], logins.clone()),
        logins: MockLoginRepo::new(logins.clone()),
        keys: test_keys(),
    };

    let output = uc
        .execute(
            LoginInput {
                identifier: "alice".to_owned(),
                password: "hunter2".to_owned(),
            },
            LoginMeta {
                ip_address: Some("203.0.113.9".to_owned()),
                user_agent: Some("integration-test/1.0".to_owned()),
            },
        )
        .await
        .unwrap();

    assert_eq!(output.role, "user");
    assert!(output.expires_at > chrono::Utc::now());

    let identity = verify_token(&output.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(identity.user_id, user.id);
    assert_eq!(identity.role, Role::User);

    let events = logins.lock().unwrap();
    assert_eq!(events.len(), 1, "expected exactly one login event");
    assert_eq!(events[0].user_id, user.id);
    assert_eq!(events[0].ip_address.as_deref(), Some("203.0.113.9"));
    assert_eq!(events[0].user_agent.as_deref(), Some("integration-test/1.0"));
}

#[tokio::test]
async fn should_login_with_email_identifier() {
    let mut user = member_user();
    user.password_hash = password::hash_password("hunter2").unwrap();

    let logins = login_store(vec![]);
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user], logins.clone()),
        logins: MockLoginRepo::new(logins),
        keys: test_keys(),
    };

    let output = uc
        .execute(
            LoginInput {
                identifier: "alice@example.com".to_owned(),
                password: "hunter2".to_owned(),
            },
            LoginMeta::default(),
        )
        .await
        .unwrap();

    assert!(!output.token.is_empty());
}

#[tokio::test]
async fn should_issue_admin_token_for_admin_login() {
    let mut user = admin_user();
    user.password_hash = password::hash_password("hunter2").unwrap();

    let logins = login_store(vec![]);
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user.clone()], logins.clone()),
        logins: MockLoginRepo::new(logins),
        keys: test_keys(),
    };

    let output = uc
        .execute(
            LoginInput {
                identifier: "admin".to_owned(),
                password: "hunter2".to_owned(),
            },
            LoginMeta::default(),
        )
        .await
        .unwrap();

    assert_eq!(output.role, "admin");
    let identity = verify_token(&output.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(identity.user_id, user.id);
    assert_eq!(identity.role, Role::Admin);
}

#[tokio::test]
async fn should_reject_unknown_identifier_without_recording_event() {
    let logins = login_store(vec![]);
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![], logins.clone()),
        logins: MockLoginRepo::new(logins.clone()),
        keys: test_keys(),
    };

    let result = uc
        .execute(
            LoginInput {
                identifier: "nobody".to_owned(),
                password: "hunter2".to_owned(),
            },
            LoginMeta::default(),
        )
        .await;

    assert!(
        matches!(result, Err(ApiError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
    assert!(
        logins.lock().unwrap().is_empty(),
        "failed login must not be recorded"
    );
}

#[tokio::test]
async fn should_reject_wrong_password_without_recording_event() {
    let mut user = member_user();
    user.password_hash = password::hash_password("hunter2").unwrap();

    let logins = login_store(vec![]);
    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user], logins.clone()),
        logins: MockLoginRepo::new(logins.clone()),
        keys: test_keys(),
    };

    // Same error as an unknown identifier, so accounts cannot be enumerated.
    let result = uc
        .execute(
            LoginInput {
                identifier: "alice".to_owned(),
                password: "wrong".to_owned(),
            },
            LoginMeta::default(),
        )
        .await;

    assert!(
        matches!(result, Err(ApiError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
    assert!(
        logins.lock().unwrap().is_empty(),
        "failed login must not be recorded"
    );
}
