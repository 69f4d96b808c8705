//! Database ping implementation
//!
//! Provides lightweight health checking by running the driver's native
//! liveness round-trip and measuring response time.

use std::time::{Duration, Instant};
use wpdb_core::Connection;

/// Result of a ping operation
pub type PingResult = Result<Duration, PingError>;

/// Error that can occur during a ping operation
#[derive(Debug, Clone)]
pub enum PingError {
    /// The connection is closed
    ConnectionClosed,
    /// The liveness round-trip failed
    PingFailed(String),
}

impl std::fmt::Display for PingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PingError::ConnectionClosed => write!(f, "Connection is closed"),
            PingError::PingFailed(msg) => write!(f, "Ping failed: {}", msg),
        }
    }
}

impl std::error::Error for PingError {}

/// Ping a database connection to check if it's alive.
///
/// Runs the driver's liveness round-trip and returns how long it took.
/// A failure here is a cache-miss signal for the manager, never a
/// caller-facing error.
pub async fn ping_database(conn: &dyn Connection) -> PingResult {
    if conn.is_closed() {
        return Err(PingError::ConnectionClosed);
    }

    let start = Instant::now();
    match conn.ping().await {
        Ok(()) => Ok(start.elapsed()),
        Err(e) => Err(PingError::PingFailed(e.to_string())),
    }
}
