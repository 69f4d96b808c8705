//! wpdb core - Core abstractions for the WordPress test database tooling
//!
//! This crate provides the fundamental traits and types the other wpdb
//! crates depend on. It defines:
//!
//! - `Connection` - Trait for live database connections
//! - `WpdbError` / `Result` - Error taxonomy shared across the workspace
//! - Common types like `Value`, `Row` and `QueryResult`

mod connection;
mod error;
mod types;

pub use connection::*;
pub use error::*;
pub use types::*;
