//! LfuCache: frequency-bucketed cache with batch eviction
//!
//! Every entry sits on exactly one frequency rung. `get` promotes an entry one
//! rung up (saturating at `capacity`), `put` on a full cache first runs an
//! eviction pass that drains rungs from the lowest upward, oldest key first.

use std::collections::HashMap;
use std::fmt;

use ahash::RandomState;
use tracing::{debug, trace, warn};

use crate::bucket::FrequencyBucket;
use crate::config::CacheConfig;
use crate::entry::CacheEntry;
use crate::error::{InvariantError, Result};
use crate::stats::CacheStats;

/// Fixed-capacity LFU cache with recency tie-breaking
pub struct LfuCache {
    /// Primary map: key -> entry
    entries: HashMap<String, CacheEntry, RandomState>,

    /// Rungs `0..=capacity`, never resized after construction
    buckets: Vec<FrequencyBucket<String>>,

    /// Top rung; saturated entries stay here
    highest_frequency: usize,

    config: CacheConfig,

    stats: CacheStats,
}

impl LfuCache {
    /// Rung every new entry starts on
    pub const LOWEST_FREQUENCY: usize = CacheEntry::INITIAL_FREQUENCY;

    /// Create a new cache
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, must be positive
    /// * `eviction_factor` - Fraction of capacity evicted per pass, in (0, 1]
    ///
    /// # Returns
    /// * `Result<LfuCache>` - Error if either parameter is out of range
    pub fn new(capacity: usize, eviction_factor: f64) -> Result<Self> {
        Self::with_config(CacheConfig::new(capacity, eviction_factor))
    }

    /// Create a new cache from a full configuration
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;

        let capacity = config.capacity;
        let buckets = (0..=capacity).map(|_| FrequencyBucket::new()).collect();

        Ok(Self {
            entries: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            buckets,
            highest_frequency: capacity,
            config,
            stats: CacheStats::new(),
        })
    }

    /// Insert or overwrite a value
    ///
    /// Overwriting keeps the entry's frequency and rung position. A new key
    /// on a full cache triggers one eviction pass before it is inserted at
    /// the lowest rung.
    pub fn put(&mut self, key: &str, value: i64) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.set_value(value);
            self.stats.record_update();
            trace!(key, value, "value overwritten");
            return;
        }

        if self.entries.len() >= self.capacity() {
            self.evict();
        }

        self.buckets[Self::LOWEST_FREQUENCY].append(key.to_string());
        self.entries.insert(key.to_string(), CacheEntry::new(key, value));
        self.stats.record_insert();
        trace!(key, value, len = self.entries.len(), "entry inserted");
    }

    /// Get a value, promoting its entry one rung
    ///
    /// Returns `None` on a miss, in which case nothing changes.
    pub fn get(&mut self, key: &str) -> Option<i64> {
        match self.promote(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Move an entry to the next rung, or to the back of the top rung when
    /// already saturated. Returns the entry's value.
    fn promote(&mut self, key: &str) -> Option<i64> {
        let entry = self.entries.get_mut(key)?;
        let current = entry.frequency();
        let next = if current < self.highest_frequency {
            current + 1
        } else {
            current
        };

        let owned = self.buckets[current]
            .remove(key)
            .unwrap_or_else(|| key.to_string());
        self.buckets[next].append(owned);
        entry.set_frequency(next);

        trace!(key, from = current, to = next, "entry promoted");
        Some(entry.value())
    }

    /// Run one eviction pass, returning how many entries were removed.
    ///
    /// Rungs are drained from the lowest upward, oldest key first, stopping
    /// as soon as the batch size is reached.
    fn evict(&mut self) -> usize {
        let target = self.config.batch_size();
        let mut removed = 0;

        for bucket in &mut self.buckets[Self::LOWEST_FREQUENCY..=self.highest_frequency] {
            if removed == target {
                break;
            }
            if bucket.is_empty() {
                continue;
            }
            for key in bucket.drain_oldest(target - removed) {
                self.entries.remove(&key);
                removed += 1;
            }
        }

        self.stats.record_eviction_pass(removed);
        if target == 0 {
            warn!(
                capacity = self.capacity(),
                eviction_factor = self.config.eviction_factor,
                "eviction batch is empty, cache will exceed capacity"
            );
        }
        debug!(target, removed, len = self.entries.len(), "eviction pass");
        removed
    }

    /// Render every rung as `freq\tkey\tkey\t...\n`, keys oldest first
    pub fn debug_dump(&self) -> String {
        self.to_string()
    }

    /// Get a value without promoting it
    pub fn peek(&self, key: &str) -> Option<i64> {
        self.entries.get(key).map(CacheEntry::value)
    }

    /// Get an entry's current rung
    pub fn frequency(&self, key: &str) -> Option<usize> {
        self.entries.get(key).map(CacheEntry::frequency)
    }

    /// Check if a key is cached (no promotion)
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys on one rung, oldest first. Empty for rungs above the cap.
    pub fn bucket_keys(&self, frequency: usize) -> impl Iterator<Item = &str> + '_ {
        self.buckets
            .get(frequency)
            .into_iter()
            .flat_map(|bucket| bucket.iter().map(String::as_str))
    }

    /// Get current number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Get the eviction factor
    pub fn eviction_factor(&self) -> f64 {
        self.config.eviction_factor
    }

    /// Number of entries one eviction pass removes
    pub fn batch_size(&self) -> usize {
        self.config.batch_size()
    }

    /// Highest rung an entry can reach
    pub fn highest_frequency(&self) -> usize {
        self.highest_frequency
    }

    /// Get the configuration the cache was built with
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Verify the rung table against the primary map
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        if self.buckets.len() != self.highest_frequency + 1 {
            return Err(InvariantError::new(format!(
                "expected {} rungs, found {}",
                self.highest_frequency + 1,
                self.buckets.len()
            )));
        }

        let mut bucketed = 0;
        for (frequency, bucket) in self.buckets.iter().enumerate() {
            for key in bucket {
                let entry = self.entries.get(key).ok_or_else(|| {
                    InvariantError::new(format!("rung {} holds unknown key {:?}", frequency, key))
                })?;
                if entry.key() != key.as_str() {
                    return Err(InvariantError::new(format!(
                        "map key {:?} points at entry {:?}",
                        key,
                        entry.key()
                    )));
                }
                if entry.frequency() != frequency {
                    return Err(InvariantError::new(format!(
                        "key {:?} on rung {} has frequency {}",
                        key,
                        frequency,
                        entry.frequency()
                    )));
                }
            }
            bucketed += bucket.len();
        }

        if bucketed != self.entries.len() {
            return Err(InvariantError::new(format!(
                "rungs hold {} keys, map holds {}",
                bucketed,
                self.entries.len()
            )));
        }

        if self.entries.len() > self.capacity() && self.batch_size() > 0 {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.entries.len(),
                self.capacity()
            )));
        }

        Ok(())
    }
}

impl fmt::Display for LfuCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (frequency, bucket) in self.buckets.iter().enumerate() {
            write!(f, "{}\t", frequency)?;
            for key in bucket {
                write!(f, "{}\t", key)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for LfuCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.capacity())
            .field("eviction_factor", &self.eviction_factor())
            .field("len", &self.len())
            .field("undersized_batch", &self.config.undersized_batch)
            .finish()
    }
}
