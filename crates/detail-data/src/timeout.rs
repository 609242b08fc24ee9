//! Timeout configuration for fetch operations.

use std::time::Duration;

/// Timeout configuration for a fetch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total operation timeout. Exceeding it fails the request.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: total / 4,
            total,
        }
    }

    pub fn from_millis(total_ms: u64) -> Self {
        Self::from_total(Duration::from_millis(total_ms))
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_millis(10_000)
    }
}
