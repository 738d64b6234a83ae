//! Registration, login and identity resolution against a real schema.

mod common;

use acme_auth_store::auth::resolve_identity;
use acme_auth_store::error::{Conflict, Error};
use acme_auth_store::AppState;
use actix_web::http::header::HeaderValue;
use common::{file_state, test_state};
use std::sync::Arc;
use temp_dir::TempDir;
use uuid::Uuid;

#[tokio::test]
async fn register_then_login_resolves_to_created_user() {
    let state = test_state().await;

    for (username, password) in [("alice", "pw1234"), ("bob", "hunter2"), ("c", "x")] {
        let (user, _) = state
            .authenticator()
            .register(username, password)
            .await
            .unwrap();

        let token = state.authenticator().login(username, password).await.unwrap();

        assert_eq!(state.tokens.verify(&token).unwrap(), user.id);
    }
}

#[tokio::test]
async fn stored_password_is_hashed() {
    let state = test_state().await;
    state.authenticator().register("alice", "pw1234").await.unwrap();

    let user = state.users().find_by_username("alice").await.unwrap().unwrap();

    assert_ne!(user.password_hash, "pw1234");
    assert!(user.password_hash.starts_with("$2"));
}

#[tokio::test]
async fn duplicate_username_conflicts_regardless_of_password() {
    let state = test_state().await;
    let (first, _) = state.authenticator().register("alice", "pw1234").await.unwrap();

    for password in ["pw1234", "different"] {
        let err = state
            .authenticator()
            .register("alice", password)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(Conflict::Username)));
    }

    let users = state.users().list_all().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, first.id);
}

#[tokio::test]
async fn usernames_are_case_sensitive() {
    let state = test_state().await;
    state.authenticator().register("alice", "pw1234").await.unwrap();

    assert!(state.authenticator().register("Alice", "pw1234").await.is_ok());
    assert!(state.users().find_by_username("ALICE").await.unwrap().is_none());
}

#[tokio::test]
async fn wrong_password_and_unknown_user_fail_identically() {
    let state = test_state().await;
    state.authenticator().register("alice", "pw1234").await.unwrap();

    let wrong_password = state
        .authenticator()
        .login("alice", "nope")
        .await
        .unwrap_err();
    let unknown_user = state
        .authenticator()
        .login("mallory", "pw1234")
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, Error::Unauthorized));
    assert!(matches!(unknown_user, Error::Unauthorized));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn invalid_registration_input_is_rejected() {
    let state = test_state().await;

    for (username, password) in [("", "pw"), ("alice", ""), ("abcdefghijklmnopqrstu", "pw")] {
        let err = state
            .authenticator()
            .register(username, password)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "{username:?}/{password:?}");
    }
    assert!(state.users().list_all().await.unwrap().is_empty());
}

async fn race_registrations(state: Arc<AppState>, attempts: usize) -> (usize, usize) {
    let handles: Vec<_> = (0..attempts)
        .map(|i| {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                state
                    .authenticator()
                    .register("racer", &format!("pw{i}"))
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    let mut conflicts = 0;
    for result in futures::future::join_all(handles).await {
        match result.unwrap() {
            Ok(_) => successes += 1,
            Err(Error::Conflict(Conflict::Username)) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    (successes, conflicts)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicate_registrations_admit_exactly_one() {
    let state = Arc::new(test_state().await);

    let (successes, conflicts) = race_registrations(Arc::clone(&state), 50).await;

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 49);
    assert_eq!(state.users().list_all().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn duplicate_registrations_across_connections_admit_exactly_one() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = Arc::new(file_state(&dir).await);

    let (successes, conflicts) = race_registrations(Arc::clone(&state), 50).await;

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 49);
    assert_eq!(state.users().list_all().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn gate_resolves_valid_token() {
    let state = test_state().await;
    let (user, token) = state.authenticator().register("alice", "pw1234").await.unwrap();

    let header = HeaderValue::from_str(&token).unwrap();
    let identity = resolve_identity(&state, Some(&header)).await.unwrap();

    assert_eq!(identity.id, user.id);
    assert_eq!(identity.username, "alice");
}

#[tokio::test]
async fn gate_tolerates_bearer_prefix() {
    let state = test_state().await;
    let (user, token) = state.authenticator().register("alice", "pw1234").await.unwrap();

    let header = HeaderValue::from_str(&format!("Bearer {token}")).unwrap();
    let identity = resolve_identity(&state, Some(&header)).await.unwrap();

    assert_eq!(identity.id, user.id);
}

#[tokio::test]
async fn gate_rejects_missing_header_as_unauthenticated() {
    let state = test_state().await;

    let err = resolve_identity(&state, None).await.unwrap_err();

    assert!(matches!(err, Error::Unauthenticated));
}

#[tokio::test]
async fn gate_rejects_garbage_token() {
    let state = test_state().await;

    let header = HeaderValue::from_static("definitely-not-a-token");
    let err = resolve_identity(&state, Some(&header)).await.unwrap_err();

    assert!(matches!(err, Error::Unauthorized));
}

#[tokio::test]
async fn gate_rejects_token_for_unknown_subject() {
    let state = test_state().await;
    let token = state.tokens.issue(Uuid::new_v4()).unwrap();

    let header = HeaderValue::from_str(&token).unwrap();
    let err = resolve_identity(&state, Some(&header)).await.unwrap_err();

    assert!(matches!(err, Error::Unauthorized));
}
