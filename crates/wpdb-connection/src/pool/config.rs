//! Pool configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the connection manager
///
/// Controls how long a cached connection may sit idle and how old it
/// may grow before the expiry sweep closes it. The defaults match the
/// production values; tests compress the windows to drive eviction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Milliseconds since last hand-out before a connection expires
    idle_timeout_ms: u64,
    /// Milliseconds since creation before a connection is recycled
    max_lifetime_ms: u64,
}

impl PoolConfig {
    /// Set the idle timeout in milliseconds
    pub fn with_idle_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.idle_timeout_ms = timeout_ms;
        self
    }

    /// Set the maximum connection lifetime in milliseconds
    pub fn with_max_lifetime_ms(mut self, lifetime_ms: u64) -> Self {
        self.max_lifetime_ms = lifetime_ms;
        self
    }

    /// Get the idle timeout as a Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    /// Get the maximum lifetime as a Duration
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_millis(self.max_lifetime_ms)
    }
}

impl Default for PoolConfig {
    /// Create a default pool configuration
    ///
    /// Defaults:
    /// - idle_timeout: 5 minutes
    /// - max_lifetime: 30 minutes
    fn default() -> Self {
        Self {
            idle_timeout_ms: 300_000,
            max_lifetime_ms: 1_800_000,
        }
    }
}
