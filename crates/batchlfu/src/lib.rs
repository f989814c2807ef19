//! # batchlfu
//!
//! Fixed-capacity LFU cache with recency tie-breaking and batch eviction.
//!
//! ## Architecture
//! - **HashMap**: AHash primary map from key to [`CacheEntry`] (O(1))
//! - **Frequency rungs**: `capacity + 1` insertion-ordered key sets, one per
//!   access count; `get` moves a key one rung up, saturating at the top
//! - **Batch eviction**: a full cache drains `floor(capacity * eviction_factor)`
//!   keys from the lowest rungs upward, oldest first, before inserting
//!
//! ## Example
//!
//! ```
//! use batchlfu::LfuCache;
//!
//! let mut cache = LfuCache::new(2, 1.0)?;
//! cache.put("a", 1);
//! cache.put("b", 2);
//! assert_eq!(cache.get("a"), Some(1));
//!
//! // Full: one pass evicts both entries, lowest rung first.
//! cache.put("c", 3);
//! assert_eq!(cache.len(), 1);
//! assert_eq!(cache.get("b"), None);
//! # Ok::<(), batchlfu::Error>(())
//! ```

#![warn(missing_docs)]

mod bucket;
mod cache;
mod config;
mod entry;
mod error;
mod stats;

pub use bucket::{DrainOldest, FrequencyBucket, Iter as BucketIter};
pub use cache::LfuCache;
pub use config::{CacheConfig, UndersizedBatch};
pub use entry::CacheEntry;
pub use error::{Error, InvariantError, Result};
pub use stats::CacheStats;
