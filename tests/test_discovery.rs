// tests/test_discovery.rs
//
// Object-lock bucket discovery against the in-memory store.

mod common;

use common::{LockState, MockStore};
use s3lockgen::discover_buckets;

#[tokio::test]
async fn test_keeps_listing_order_and_skips_unlocked() {
    let store = MockStore::new()
        .with_bucket("zeta", LockState::Enabled)
        .with_bucket("alpha", LockState::NotConfigured)
        .with_bucket("mid", LockState::Enabled)
        .with_bucket("beta", LockState::NotConfigured);

    let inventory = discover_buckets(&store).await.unwrap();
    assert_eq!(inventory.all, vec!["zeta", "alpha", "mid", "beta"]);
    assert_eq!(inventory.object_lock_enabled, vec!["zeta", "mid"]);
    assert_eq!(store.lock_queries(), vec!["zeta", "alpha", "mid", "beta"]);
}

#[tokio::test]
async fn test_empty_account() {
    let store = MockStore::new();
    let inventory = discover_buckets(&store).await.unwrap();
    assert!(inventory.is_empty());
    assert!(inventory.object_lock_enabled.is_empty());
    assert!(store.lock_queries().is_empty());
}

#[tokio::test]
async fn test_other_query_errors_abort_discovery() {
    let store = MockStore::new()
        .with_bucket("ok", LockState::Enabled)
        .with_bucket("denied", LockState::QueryFails)
        .with_bucket("never-asked", LockState::Enabled);

    let err = discover_buckets(&store).await.unwrap_err();
    assert!(err.to_string().contains("AccessDenied"), "{err:#}");
    assert_eq!(store.lock_queries(), vec!["ok", "denied"]);
}
