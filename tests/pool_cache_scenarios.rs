// ==============================================
// POOL CACHE SCENARIOS (integration)
// ==============================================
//
// End-to-end flows through the key/value facade, over each pool kind the
// builder produces.

use cachepool::prelude::*;
use chrono::{TimeDelta, Utc};

fn runtime_cache() -> PoolCache<AnyPool<String>> {
    pool_cache(PoolBuilder::new().build(PoolKind::Runtime))
}

// ==============================================
// Single-Key Flows
// ==============================================

mod single_key {
    use super::*;

    #[test]
    fn set_get_delete_cycle() {
        let mut cache = runtime_cache();
        assert!(!cache.has("profile.7").unwrap());
        assert_eq!(cache.get("profile.7", None).unwrap(), None);

        assert!(
            cache
                .set("profile.7", "grace".to_string(), Some(Expiration::after_secs(3306)))
                .unwrap()
        );
        assert!(cache.has("profile.7").unwrap());
        assert_eq!(
            cache.get("profile.7", Some("fallback".to_string())).unwrap(),
            Some("grace".to_string())
        );

        assert!(cache.delete("profile.7").unwrap());
        assert!(!cache.delete("profile.7").unwrap());
        assert_eq!(
            cache.get("profile.7", Some("fallback".to_string())).unwrap(),
            Some("fallback".to_string())
        );
    }

    #[test]
    fn overwrite_replaces_value_and_ttl() {
        let mut cache = runtime_cache();
        let at = Utc::now() + TimeDelta::days(2);
        cache.set("k", "old".to_string(), Some(at.into())).unwrap();
        cache.set("k", "new".to_string(), None).unwrap();

        let item = cache.pool().get_item("k").unwrap();
        assert_eq!(item.get().map(String::as_str), Some("new"));
        assert_eq!(item.expiration_time(), None);
    }

    #[test]
    fn invalid_keys_surface_as_errors() {
        let mut cache = runtime_cache();
        assert_eq!(cache.get("", None), Err(InvalidArgument::EmptyKey));
        assert!(matches!(
            cache.set("no spaces", "v".to_string(), None),
            Err(InvalidArgument::InvalidKeyCharacters { .. })
        ));
        assert!(cache.delete(&"x".repeat(MAX_KEY_LEN + 1)).is_err());
        assert!(cache.has(&"x".repeat(MAX_KEY_LEN)).is_ok());
    }
}

// ==============================================
// Batch Flows
// ==============================================

mod batch {
    use super::*;

    #[test]
    fn set_multiple_then_get_multiple() {
        let mut cache = runtime_cache();
        let pairs = (1..=5).map(|n| (format!("batch.{n}"), format!("value {n}")));
        assert!(cache.set_multiple(pairs, Some(Ttl::Seconds(60).into())).unwrap());

        let keys: Vec<String> = (0..=6).map(|n| format!("batch.{n}")).collect();
        let values: Vec<Option<String>> = cache
            .get_multiple(keys, Some("none".to_string()))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(values.len(), 7);
        assert_eq!(values[0].as_deref(), Some("none"));
        assert_eq!(values[3].as_deref(), Some("value 3"));
        assert_eq!(values[6].as_deref(), Some("none"));
    }

    #[test]
    fn delete_multiple_reports_partial_misses() {
        let mut cache = runtime_cache();
        cache
            .set_multiple([("a", "1".to_string()), ("c", "3".to_string())], None)
            .unwrap();
        assert!(!cache.delete_multiple(["a", "b", "c"]).unwrap());
        assert!(!cache.has("a").unwrap());
        assert!(!cache.has("c").unwrap());
    }

    #[test]
    fn batches_over_null_pool_succeed_and_vanish() {
        let mut cache = pool_cache(PoolBuilder::new().build::<String>(PoolKind::Null));
        assert!(
            cache
                .set_multiple([("a", "1".to_string()), ("b", "2".to_string())], None)
                .unwrap()
        );
        let values: Vec<_> = cache
            .get_multiple(["a", "b"], None)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(values, [None, None]);
        assert!(cache.delete_multiple(["a", "b"]).unwrap());
    }
}

// ==============================================
// Expiry Enforcement
// ==============================================

mod expiry {
    use super::*;

    #[test]
    fn enforced_pool_hides_expired_values() {
        let pool = PoolBuilder::new()
            .expiry(ExpiryPolicy::EnforceOnRead)
            .build::<String>(PoolKind::Runtime);
        let mut cache = pool_cache(pool);

        let past = Utc::now() - TimeDelta::seconds(1);
        cache.set("gone", "v".to_string(), Some(past.into())).unwrap();
        cache.set("kept", "v".to_string(), Some(Expiration::after_secs(600))).unwrap();

        assert_eq!(cache.get("gone", None).unwrap(), None);
        assert_eq!(cache.get("kept", None).unwrap(), Some("v".to_string()));

        let metrics = cache.pool().metrics().unwrap();
        assert_eq!(metrics.expired, 1);
        assert_eq!(metrics.hits, 1);
    }

    #[test]
    fn default_pool_returns_expired_values() {
        let mut cache = runtime_cache();
        let past = Utc::now() - TimeDelta::seconds(1);
        cache.set("gone", "v".to_string(), Some(past.into())).unwrap();
        assert_eq!(cache.get("gone", None).unwrap(), Some("v".to_string()));
    }
}
