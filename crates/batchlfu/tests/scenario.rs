// ==============================================
// END-TO-END SCENARIOS (integration)
// ==============================================
//
// Drives the public API through complete traces and checks the rung table
// and the undersized-batch policies from the outside.

use batchlfu::{CacheConfig, LfuCache, UndersizedBatch};

const TRACE_GETS: [&str; 13] = ["c", "d", "c", "c", "c", "d", "d", "b", "b", "a", "a", "d", "c"];

fn warmed_cache() -> LfuCache {
    let mut cache = LfuCache::new(4, 0.8).unwrap();
    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);
    cache.put("d", 4);
    for key in TRACE_GETS {
        assert!(cache.get(key).is_some());
    }
    cache
}

mod canonical_trace {
    use super::*;

    #[test]
    fn frequencies_after_gets() {
        let cache = warmed_cache();

        assert_eq!(cache.frequency("a"), Some(2));
        assert_eq!(cache.frequency("b"), Some(2));
        assert_eq!(cache.frequency("c"), Some(4));
        assert_eq!(cache.frequency("d"), Some(4));
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn dump_before_eviction() {
        let cache = warmed_cache();

        // c was re-appended to the saturated rung by the last get.
        assert_eq!(cache.debug_dump(), "0\t\n1\t\n2\tb\ta\t\n3\t\n4\td\tc\t\n");
    }

    #[test]
    fn batch_eviction_on_full_put() {
        let mut cache = warmed_cache();
        assert_eq!(cache.batch_size(), 3);

        cache.put("e", 5);

        // b and a from rung 2, then d as the oldest on rung 4.
        assert_eq!(cache.debug_dump(), "0\te\t\n1\t\n2\t\n3\t\n4\tc\t\n");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek("c"), Some(3));
        assert_eq!(cache.peek("e"), Some(5));
        assert_eq!(cache.stats().evictions(), 3);
        assert_eq!(cache.stats().eviction_passes(), 1);
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn stats_for_trace() {
        let mut cache = warmed_cache();
        cache.get("zzz");

        assert_eq!(cache.stats().inserts(), 4);
        assert_eq!(cache.stats().hits(), 13);
        assert_eq!(cache.stats().misses(), 1);
    }
}

mod overwrite {
    use super::*;

    #[test]
    fn overwrite_is_not_an_access() {
        let mut cache = warmed_cache();
        let before = cache.debug_dump();

        cache.put("a", 100);

        assert_eq!(cache.debug_dump(), before);
        assert_eq!(cache.peek("a"), Some(100));
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn overwrite_on_full_cache_does_not_evict() {
        let mut cache = warmed_cache();

        cache.put("c", 30);

        assert_eq!(cache.len(), 4);
        assert_eq!(cache.stats().eviction_passes(), 0);
    }
}

mod undersized_batch {
    use super::*;

    #[test]
    fn overflow_grows_past_capacity() {
        let mut cache = LfuCache::new(3, 0.2).unwrap();
        assert_eq!(cache.config().undersized_batch, UndersizedBatch::Overflow);

        for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
            cache.put(key, i as i64);
        }
        assert_eq!(cache.len(), 4);

        cache.put("e", 4);
        assert_eq!(cache.len(), 5);
        assert_eq!(cache.stats().eviction_passes(), 2);
        assert_eq!(cache.stats().evictions(), 0);
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn evict_one_keeps_bound() {
        let config = CacheConfig::new(3, 0.2).with_undersized_batch(UndersizedBatch::EvictOne);
        let mut cache = LfuCache::with_config(config).unwrap();
        cache.put("a", 0);
        cache.put("b", 1);
        cache.put("c", 2);
        cache.get("a");

        cache.put("d", 3);
        cache.put("e", 4);

        assert_eq!(cache.len(), 3);
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(!cache.contains("c"));
        assert_eq!(cache.stats().evictions(), 2);
    }
}

mod churn {
    use super::*;

    #[test]
    fn hot_keys_survive_cold_churn() {
        let mut cache = LfuCache::new(8, 0.5).unwrap();
        for key in ["h1", "h2"] {
            cache.put(key, 1);
            for _ in 0..3 {
                cache.get(key);
            }
        }

        for i in 0..100 {
            cache.put(&format!("cold{}", i), i);
            assert!(cache.len() <= 8);
            assert!(cache.check_invariants().is_ok());
        }

        assert!(cache.contains("h1"));
        assert!(cache.contains("h2"));
        assert_eq!(cache.frequency("h1"), Some(3));
    }
}
