//! Property-based tests for gateway-common crate.
//!
//! These tests verify cache properties across generated keys using proptest.

use gateway_common::{CacheStore, MemoryCacheStore, ResponseCache};
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9]{1,12}", 1..4).prop_map(|segments| segments.join("/"))
}

// *For any* two distinct resource paths, values cached under one path are
// never returned for the other.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_distinct_paths_never_collide(
        a in path_strategy(),
        b in path_strategy(),
    ) {
        prop_assume!(a != b);

        tokio_test::block_on(async {
            let cache = ResponseCache::new(Arc::new(MemoryCacheStore::new()), "gateway");
            let ttl = Duration::from_secs(5);
            let (path_a, path_b) = (&a, &b);

            let first = cache
                .get_or_compute(&a, ttl, move || async move { Ok::<_, ()>(json!({ "path": path_a })) })
                .await;
            let second = cache
                .get_or_compute(&b, ttl, move || async move { Ok::<_, ()>(json!({ "path": path_b })) })
                .await;

            prop_assert_eq!(first, Ok(json!({ "path": a })));
            prop_assert_eq!(second, Ok(json!({ "path": b })));
            prop_assert_eq!(cache.store().len().await, 2);

            Ok(())
        })?;
    }

    #[test]
    fn prop_repeated_reads_compute_once(
        path in path_strategy(),
        reads in 1usize..20,
    ) {
        tokio_test::block_on(async {
            let cache = ResponseCache::new(Arc::new(MemoryCacheStore::new()), "gateway");
            let calls = AtomicUsize::new(0);
            let counter = &calls;

            for _ in 0..reads {
                let value = cache
                    .get_or_compute(&path, Duration::from_secs(300), move || async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, ()>(json!(true))
                    })
                    .await;
                prop_assert_eq!(value, Ok(json!(true)));
            }

            prop_assert_eq!(calls.load(Ordering::SeqCst), 1);

            Ok(())
        })?;
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_namespaced_key_prefixes_path(
        namespace in "[a-z]{1,10}",
        path in path_strategy(),
    ) {
        let cache = ResponseCache::new(Arc::new(MemoryCacheStore::new()), namespace.clone());
        let key = cache.namespaced_key(&path);

        let prefix = format!("{namespace}-");

        prop_assert!(key.starts_with(&prefix));
        prop_assert!(key.ends_with(&path));
    }
}
