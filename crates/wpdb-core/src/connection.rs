//! Connection trait

use crate::{QueryResult, Result, Value};
use async_trait::async_trait;

/// A live database connection.
///
/// Implementations wrap one physical connection to the server. The
/// connection manager owns the lifecycle: callers obtain a connection
/// from the manager, run statements on it, and never close it
/// themselves.
#[async_trait]
pub trait Connection: Send + Sync + std::fmt::Debug {
    /// Get the driver name (e.g., "mysql")
    fn driver_name(&self) -> &str;

    /// Execute a statement that modifies data (INSERT/UPDATE/DELETE).
    ///
    /// Returns the number of affected rows.
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64>;

    /// Execute a query that returns rows (SELECT)
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Lightweight liveness round-trip against the server.
    ///
    /// Used by the connection manager to validate cached connections
    /// before handing them out.
    async fn ping(&self) -> Result<()>;

    /// Close the connection
    async fn close(&self) -> Result<()>;

    /// Check if the connection is closed
    fn is_closed(&self) -> bool;
}
