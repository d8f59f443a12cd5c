use std::{
    fs,
    path::PathBuf,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use userstore::service::repository::{NoSession, StaticSession};
use userstore::{NewUser, StoreError, UserRepository, UserStorage};

fn temp_db_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "userstore-{}-{}-{}.sqlite",
        tag,
        std::process::id(),
        nanos
    ));
    temp_path
}

async fn fresh_storage(tag: &str) -> (UserStorage, PathBuf) {
    let path = temp_db_path(tag);
    let database_url = format!("sqlite:{}", path.display());
    let storage = UserStorage::connect(&database_url)
        .await
        .expect("failed to open storage");
    storage.init_schema().await.expect("failed to init schema");
    (storage, path)
}

#[tokio::test]
async fn lists_users_in_insertion_order() {
    let (storage, path) = fresh_storage("listing").await;
    let repo = UserRepository::new(storage, Arc::new(NoSession));

    repo.add_user(NewUser::named("alice")).await.expect("insert alice");
    repo.add_user(NewUser::named("bob")).await.expect("insert bob");

    let users = repo.list_users().await.expect("listing failed");
    let lines: Vec<String> = users.iter().map(|u| format!("User: {}", u.name)).collect();
    assert_eq!(lines, vec!["User: alice".to_string(), "User: bob".to_string()]);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn insert_is_idempotent_on_name() {
    let (storage, path) = fresh_storage("upsert").await;
    let repo = UserRepository::new(storage, Arc::new(NoSession));

    let first = repo.add_user(NewUser::named("alice")).await.expect("insert");
    let second = repo
        .add_user(NewUser {
            name: "alice".to_string(),
            email: Some("alice@example.com".to_string()),
        })
        .await
        .expect("upsert");
    assert_eq!(first, second);

    let found = repo
        .find_user("alice")
        .await
        .expect("lookup failed")
        .expect("alice missing");
    assert_eq!(found.email.as_deref(), Some("alice@example.com"));
    assert!(found.active);

    let users = repo.list_users().await.expect("listing failed");
    assert_eq!(users.len(), 1);

    repo.storage()
        .set_active(first, false)
        .await
        .expect("deactivate failed");
    let found = repo
        .find_user("alice")
        .await
        .expect("lookup failed")
        .expect("alice missing");
    assert!(!found.active);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn validation_without_session_denies_instead_of_faulting() {
    let (storage, path) = fresh_storage("no-session").await;
    let repo = UserRepository::new(storage, Arc::new(NoSession));
    repo.add_user(NewUser::named("alice")).await.expect("insert");

    for _ in 0..3 {
        let valid = repo.validate_user("alice").await.expect("validation errored");
        assert!(!valid);
    }

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn validation_matches_static_session_identity() {
    let (storage, path) = fresh_storage("static-session").await;
    let repo = UserRepository::new(storage, Arc::new(StaticSession::new("alice")));

    assert!(repo.validate_user("alice").await.expect("validation errored"));
    assert!(!repo.validate_user("bob").await.expect("validation errored"));

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn repeated_listing_keeps_connection_count_at_the_pool_bound() {
    let path = temp_db_path("pool-bound");
    let database_url = format!("sqlite:{}", path.display());
    let storage = UserStorage::connect_with_limit(&database_url, 1)
        .await
        .expect("failed to open storage");
    storage.init_schema().await.expect("failed to init schema");

    let repo = UserRepository::new(storage.clone(), Arc::new(NoSession));
    repo.add_user(NewUser::named("alice")).await.expect("insert alice");
    repo.add_user(NewUser::named("bob")).await.expect("insert bob");

    for _ in 0..25 {
        let users = repo.list_users().await.expect("listing failed");
        assert_eq!(users.len(), 2);
    }

    // Concurrent listings share the single pooled connection instead of
    // each opening their own.
    let concurrent = futures::future::join_all((0..8).map(|_| repo.list_users())).await;
    for result in concurrent {
        assert_eq!(result.expect("concurrent listing failed").len(), 2);
    }

    assert!(storage.pool().size() <= 1);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn unreachable_database_surfaces_typed_connectivity_error() {
    let err = UserStorage::connect("sqlite:/nonexistent-dir/userstore/ghost.sqlite")
        .await
        .expect_err("connect against a missing directory should fail");
    assert!(matches!(err, StoreError::Connectivity { .. }));
}
