//! Cache entry record
//!
//! Identity is the key alone: value and frequency change in place without
//! affecting equality or hashing.

use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

/// A key/value/frequency triple owned by the cache
#[derive(Debug, Clone)]
pub struct CacheEntry {
    key: String,
    value: i64,
    frequency: usize,
}

impl CacheEntry {
    /// Frequency of a freshly inserted entry
    pub const INITIAL_FREQUENCY: usize = 0;

    /// Create a new entry at the initial frequency
    pub fn new(key: impl Into<String>, value: i64) -> Self {
        Self {
            key: key.into(),
            value,
            frequency: Self::INITIAL_FREQUENCY,
        }
    }

    /// Get the key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the current value
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Get the current frequency rung
    pub fn frequency(&self) -> usize {
        self.frequency
    }

    /// Overwrite the value
    pub fn set_value(&mut self, value: i64) {
        self.value = value;
    }

    /// Move the entry to another frequency rung
    pub fn set_frequency(&mut self, frequency: usize) {
        self.frequency = frequency;
    }
}

impl PartialEq for CacheEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CacheEntry {}

impl Hash for CacheEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Borrow<str> for CacheEntry {
    fn borrow(&self) -> &str {
        &self.key
    }
}
