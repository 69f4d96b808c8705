//! MySQL/MariaDB driver for wpdb
//!
//! Binds the connection manager to real MySQL servers via `mysql_async`:
//! a `Connection` implementation over a single physical connection, the
//! `ConnectionFactory` the manager opens connections through, and the
//! process-wide shared manager.

mod connection;
mod factory;
mod shared;

pub use connection::MySqlConnection;
pub use factory::MySqlConnectionFactory;
pub use shared::shared_manager;
