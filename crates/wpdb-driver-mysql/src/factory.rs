//! Connection factory for the manager

use std::sync::Arc;

use async_trait::async_trait;
use wpdb_connection::{ConnectionFactory, ConnectionParams};
use wpdb_core::{Connection, Result};

use crate::connection::MySqlConnection;

/// Opens MySQL connections on behalf of the connection manager
#[derive(Debug, Default)]
pub struct MySqlConnectionFactory;

impl MySqlConnectionFactory {
    /// Create a new factory
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConnectionFactory for MySqlConnectionFactory {
    async fn connect(&self, params: &ConnectionParams) -> Result<Arc<dyn Connection>> {
        let conn = MySqlConnection::connect(params).await?;
        Ok(Arc::new(conn))
    }
}
