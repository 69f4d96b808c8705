//! Process-wide shared connection manager

use std::sync::{Arc, OnceLock};

use wpdb_connection::ConnectionManager;

use crate::factory::MySqlConnectionFactory;

/// The process-wide connection manager, lazily created on first
/// access.
///
/// Every caller in the process shares the same underlying cache, so
/// two helpers asking for the same `(host, user, database)` reuse one
/// physical connection. Tests that need isolation construct their own
/// `ConnectionManager` instead.
pub fn shared_manager() -> Arc<ConnectionManager> {
    static MANAGER: OnceLock<Arc<ConnectionManager>> = OnceLock::new();
    MANAGER
        .get_or_init(|| Arc::new(ConnectionManager::new(MySqlConnectionFactory::new())))
        .clone()
}
