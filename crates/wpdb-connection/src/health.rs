//! Health check functionality for database connections
//!
//! This module provides the liveness check the connection manager runs
//! before handing out a cached connection.
//!
//! # Example
//!
//! ```ignore
//! use wpdb_connection::health::ping_database;
//!
//! let latency = ping_database(connection.as_ref()).await?;
//! println!("Database latency: {:?}", latency);
//! ```

mod ping;

#[cfg(test)]
mod tests;

pub use ping::{PingError, PingResult, ping_database};
