//! Unit tests for the in-memory OTP store

use std::time::Duration;

use sphere_core::OtpStore;

use crate::cache::InMemoryOtpStore;

#[tokio::test]
async fn test_set_get_delete() {
    let store = InMemoryOtpStore::new();

    store.set("otp:+1555", "value", 300).await.unwrap();
    assert_eq!(store.get("otp:+1555").await.unwrap(), Some("value".to_string()));

    assert!(store.delete("otp:+1555").await.unwrap());
    assert!(!store.delete("otp:+1555").await.unwrap());
    assert_eq!(store.get("otp:+1555").await.unwrap(), None);
}

#[tokio::test]
async fn test_set_overwrites() {
    let store = InMemoryOtpStore::new();

    store.set("k", "first", 300).await.unwrap();
    store.set("k", "second", 300).await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some("second".to_string()));
    assert_eq!(store.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_passive_expiry() {
    let store = InMemoryOtpStore::new();
    store.set("k", "v", 300).await.unwrap();

    tokio::time::advance(Duration::from_secs(299)).await;
    assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(store.get("k").await.unwrap(), None);
    // The read dropped the dead entry
    assert!(store.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_expired_entries_cannot_be_consumed() {
    let store = InMemoryOtpStore::new();
    store.set("k", "v", 10).await.unwrap();

    tokio::time::advance(Duration::from_secs(11)).await;
    assert!(!store.delete_if_equals("k", "v").await.unwrap());
    assert!(!store.delete("k").await.unwrap());
}

#[tokio::test]
async fn test_delete_if_equals() {
    let store = InMemoryOtpStore::new();
    store.set("k", "v1", 300).await.unwrap();

    assert!(!store.delete_if_equals("k", "v2").await.unwrap());
    assert_eq!(store.get("k").await.unwrap(), Some("v1".to_string()));

    assert!(store.delete_if_equals("k", "v1").await.unwrap());
    assert!(!store.delete_if_equals("k", "v1").await.unwrap());
    assert!(!store.delete_if_equals("missing", "v1").await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_delete_if_equals_is_exclusive() {
    let store = InMemoryOtpStore::new();
    store.set("k", "v", 300).await.unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.delete_if_equals("k", "v").await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_out_of_range_ttl_is_an_error() {
    let store = InMemoryOtpStore::new();
    assert!(store.set("k", "v", u64::MAX).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired() {
    let store = InMemoryOtpStore::new();
    store.set("short", "v", 10).await.unwrap();
    store.set("long", "v", 600).await.unwrap();

    tokio::time::advance(Duration::from_secs(60)).await;
    assert_eq!(store.purge_expired(), 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("long").await.unwrap(), Some("v".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_reaper_sweeps_without_reads() {
    let store = InMemoryOtpStore::new();
    let reaper = store.spawn_reaper(Duration::from_secs(30));

    store.set("k", "v", 10).await.unwrap();
    assert_eq!(store.len(), 1);

    // Sleeping lets the paused clock auto-advance and the reaper run
    tokio::time::sleep(Duration::from_secs(31)).await;
    tokio::task::yield_now().await;
    assert!(store.is_empty());

    reaper.abort();
}

#[tokio::test(start_paused = true)]
async fn test_reaper_stops_when_store_dropped() {
    let store = InMemoryOtpStore::new();
    let reaper = store.spawn_reaper(Duration::from_secs(1));
    drop(store);

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(reaper.await.is_ok());
}
