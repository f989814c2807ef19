//! Cache configuration

use crate::error::{Error, Result};

/// What to do when `capacity * eviction_factor` rounds down to zero.
///
/// A full cache still calls for an eviction pass before inserting a new key.
/// With an undersized batch that pass has nothing to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndersizedBatch {
    /// Evict nothing and insert anyway. The cache grows past capacity by one
    /// entry for every new key inserted while full.
    #[default]
    Overflow,

    /// Clamp the batch to one entry so the capacity bound always holds.
    EvictOne,
}

/// Parameters for building an [`LfuCache`](crate::LfuCache)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheConfig {
    /// Maximum number of entries (also the highest frequency rung)
    pub capacity: usize,

    /// Fraction of capacity removed per eviction pass, in (0, 1]
    pub eviction_factor: f64,

    /// Policy for a zero-sized eviction batch
    pub undersized_batch: UndersizedBatch,
}

impl CacheConfig {
    /// Create a config with the default undersized-batch policy
    pub fn new(capacity: usize, eviction_factor: f64) -> Self {
        Self {
            capacity,
            eviction_factor,
            undersized_batch: UndersizedBatch::default(),
        }
    }

    /// Set the undersized-batch policy
    pub fn with_undersized_batch(mut self, policy: UndersizedBatch) -> Self {
        self.undersized_batch = policy;
        self
    }

    /// Check that capacity is positive and the factor lies in (0, 1]
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity(self.capacity));
        }
        let factor = self.eviction_factor;
        if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
            return Err(Error::InvalidEvictionFactor(factor));
        }
        Ok(())
    }

    /// Number of entries one eviction pass removes
    pub fn batch_size(&self) -> usize {
        let target = (self.capacity as f64 * self.eviction_factor).floor() as usize;
        match self.undersized_batch {
            UndersizedBatch::Overflow => target,
            UndersizedBatch::EvictOne => target.max(1),
        }
    }
}
