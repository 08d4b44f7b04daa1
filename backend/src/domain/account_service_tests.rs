//! Tests for the account service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    MockPasswordHasher, MockTokenService, MockUserRepository, TokenError,
};
use crate::domain::{IssuedToken, UserId};

type TestService = AccountService<MockUserRepository, MockPasswordHasher, MockTokenService>;

fn make_service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    tokens: MockTokenService,
) -> TestService {
    AccountService::new(Arc::new(users), Arc::new(hasher), Arc::new(tokens))
}

fn stored_user(id: i64, username: &str) -> User {
    let at = Utc.timestamp_opt(1_700_000_000, 0).single().expect("timestamp");
    User::new(
        UserId::new(id).expect("positive id"),
        username,
        PasswordHash::from_phc("stored-hash"),
        "Jl. Sudirman 5",
        at,
        at,
    )
}

fn hasher_accepting(password: &'static str) -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Ok(PasswordHash::from_phc("decoy-hash")));
    hasher
        .expect_verify()
        .returning(move |candidate, hash| {
            Ok(hash.as_str() == "stored-hash" && candidate == password)
        });
    hasher
}

#[tokio::test]
async fn login_issues_token_for_matching_password() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .withf(|name| name == "alice")
        .times(1)
        .return_once(|_| Ok(Some(stored_user(7, "alice"))));
    let mut tokens = MockTokenService::new();
    tokens
        .expect_issue()
        .withf(|id| id.get() == 7)
        .times(1)
        .return_once(|_| Ok(IssuedToken::new("signed", Utc::now())));

    let service = make_service(users, hasher_accepting("s3cret"), tokens);
    let outcome = service
        .login(&LoginCredentials::new("alice", "s3cret"))
        .await
        .expect("login succeeds");

    assert_eq!(outcome.user.id().get(), 7);
    assert_eq!(outcome.token.as_str(), "signed");
}

#[rstest]
#[case::unknown_user(None, "s3cret")]
#[case::wrong_password(Some(7), "wrong")]
#[tokio::test]
async fn login_failures_are_not_found_and_issue_nothing(
    #[case] stored: Option<i64>,
    #[case] password: &str,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(move |_| Ok(stored.map(|id| stored_user(id, "alice"))));
    let mut tokens = MockTokenService::new();
    tokens.expect_issue().never();

    let service = make_service(users, hasher_accepting("s3cret"), tokens);
    let err = service
        .login(&LoginCredentials::new("alice", password))
        .await
        .expect_err("login must fail");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), LOGIN_NOT_FOUND);
}

#[tokio::test]
async fn unknown_usernames_still_pay_for_one_verification() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .withf(|password| password == DECOY_PASSWORD)
        .times(1)
        .returning(|_| Ok(PasswordHash::from_phc("decoy-hash")));
    hasher
        .expect_verify()
        .withf(|candidate, hash| candidate == "s3cret" && hash.as_str() == "decoy-hash")
        .times(2)
        .returning(|_, _| Ok(true));
    let mut tokens = MockTokenService::new();
    tokens.expect_issue().never();

    let service = make_service(users, hasher, tokens);
    for username in ["bob", "carol"] {
        let err = service
            .login(&LoginCredentials::new(username, "s3cret"))
            .await
            .expect_err("unknown user must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}

#[tokio::test]
async fn login_lookup_query_failure_is_not_found() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(|_| Err(UserPersistenceError::query("relation missing")));
    let mut tokens = MockTokenService::new();
    tokens.expect_issue().never();

    let service = make_service(users, MockPasswordHasher::new(), tokens);
    let err = service
        .login(&LoginCredentials::new("alice", "s3cret"))
        .await
        .expect_err("login must fail");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert!(!err.message().contains("relation"));
}

#[tokio::test]
async fn login_signing_failure_is_internal() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(|_| Ok(Some(stored_user(7, "alice"))));
    let mut tokens = MockTokenService::new();
    tokens
        .expect_issue()
        .return_once(|_| Err(TokenError::signing("key rejected")));

    let service = make_service(users, hasher_accepting("s3cret"), tokens);
    let err = service
        .login(&LoginCredentials::new("alice", "s3cret"))
        .await
        .expect_err("signing failure surfaces");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn register_stores_hash_not_plaintext() {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .withf(|password| password == "s3cret")
        .times(1)
        .return_once(|_| Ok(PasswordHash::from_phc("hashed")));
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .withf(|record| {
            record.username == "alice"
                && record.password_hash.as_str() == "hashed"
                && record.address == "Jl. Sudirman 5"
        })
        .times(1)
        .return_once(|_| Ok(stored_user(1, "alice")));

    let service = make_service(users, hasher, MockTokenService::new());
    let user = service
        .register(NewUser::new("alice", "s3cret", "Jl. Sudirman 5"))
        .await
        .expect("registration succeeds");

    assert_eq!(user.id().get(), 1);
}

#[rstest]
#[case(UserPersistenceError::duplicate_username("alice"), ErrorCode::Conflict)]
#[case(UserPersistenceError::query("boom"), ErrorCode::InternalError)]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[tokio::test]
async fn register_maps_store_failures(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::from_phc("hashed")));
    let mut users = MockUserRepository::new();
    users.expect_create().return_once(move |_| Err(failure));

    let service = make_service(users, hasher, MockTokenService::new());
    let err = service
        .register(NewUser::new("alice", "s3cret", ""))
        .await
        .expect_err("store failure surfaces");

    assert_eq!(err.code(), expected);
    assert!(!err.message().contains("boom"));
    assert!(!err.message().contains("refused"));
}

#[tokio::test]
async fn register_hash_failure_skips_store() {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Err(PasswordHashError::hash("out of memory")));
    let mut users = MockUserRepository::new();
    users.expect_create().never();

    let service = make_service(users, hasher, MockTokenService::new());
    let err = service
        .register(NewUser::new("alice", "s3cret", ""))
        .await
        .expect_err("hash failure surfaces");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), INSERT_FAILED);
}

#[rstest]
#[case::matching("s3cret", true)]
#[case::mismatched("nope", false)]
#[tokio::test]
async fn verify_credentials_gates_on_password(#[case] password: &str, #[case] accepted: bool) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(|_| Ok(Some(stored_user(3, "bob"))));

    let service = make_service(users, hasher_accepting("s3cret"), MockTokenService::new());
    let result = service
        .verify_credentials(&LoginCredentials::new("bob", password))
        .await;

    match (accepted, result) {
        (true, Ok(user)) => assert_eq!(user.username(), "bob"),
        (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
        (true, Err(err)) => panic!("expected success, got {err:?}"),
        (false, Ok(user)) => panic!("expected rejection, got {user:?}"),
    }
}

#[tokio::test]
async fn verify_credentials_treats_unreadable_hash_as_mismatch() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(|_| Ok(Some(stored_user(3, "bob"))));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .return_once(|_, _| Err(PasswordHashError::malformed("not a PHC string")));

    let service = make_service(users, hasher, MockTokenService::new());
    let err = service
        .verify_credentials(&LoginCredentials::new("bob", "s3cret"))
        .await
        .expect_err("unreadable hash rejects");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}
