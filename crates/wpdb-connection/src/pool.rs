//! Keyed connection pooling
//!
//! This module provides the process-wide connection cache: one live
//! connection per `(host, user, database)` key, validated before every
//! hand-out and expired by idle time and age.
//!
//! # Example
//!
//! ```ignore
//! use wpdb_connection::{ConnectionManager, ConnectionParams};
//!
//! let manager = ConnectionManager::new(factory);
//! let params = ConnectionParams::new("localhost", "wp", "secret")
//!     .with_database("wordpress_test");
//!
//! let conn = manager.get_connection(&params).await?;
//! conn.query("SELECT option_value FROM wp_options WHERE option_name = ?", &["siteurl".into()]).await?;
//! // Never close conn yourself; the manager owns its lifecycle.
//! ```

mod config;
mod manager;
mod stats;


pub use config::PoolConfig;
pub use manager::{ConnectionFactory, ConnectionManager};
pub use stats::PoolStats;
