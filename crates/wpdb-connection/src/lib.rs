//! wpdb connection - Connection management and pooling
//!
//! This crate owns the lifecycle of database connections used by the
//! test tooling: a process-wide, key-addressed cache of live
//! connections (`ConnectionManager`) plus the health-check support it
//! validates cached connections with.

mod config;
pub mod health;
pub mod pool;

pub use config::{ConnectionKey, ConnectionParams};
pub use health::{PingError, PingResult, ping_database};
pub use pool::{ConnectionFactory, ConnectionManager, PoolConfig, PoolStats};
