//! Error types for batchlfu

use std::fmt;

/// Result type alias for batchlfu operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a cache
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Capacity must be at least one entry
    InvalidCapacity(usize),

    /// Eviction factor must be a finite number in (0, 1]
    InvalidEvictionFactor(f64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(capacity) => {
                write!(f, "Invalid capacity: {} (must be greater than 0)", capacity)
            }
            Error::InvalidEvictionFactor(factor) => {
                write!(f, "Invalid eviction factor: {} (must be in (0, 1])", factor)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Error returned when an internal cache invariant is violated.
///
/// Produced by [`LfuCache::check_invariants`](crate::LfuCache::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
