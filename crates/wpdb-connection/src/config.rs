//! Connection parameters and pool keying

use serde::{Deserialize, Serialize};
use wpdb_core::{Result, WpdbError};

/// Parameters for opening a database connection.
///
/// The resolved tuple handed in by the caller-side settings resolver.
/// Password is carried for opening the physical connection but is not
/// part of the pool key (see [`ConnectionKey`]).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParams {
    /// Host address
    pub host: String,
    /// Username
    pub user: String,
    /// Password (may be empty)
    pub password: String,
    /// Database name, if one should be selected at connect time
    pub database: Option<String>,
}

impl ConnectionParams {
    /// Create parameters for the given host and user
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            database: None,
        }
    }

    /// Select a database at connect time
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Derive the pool key for these parameters
    pub fn key(&self) -> ConnectionKey {
        ConnectionKey {
            host: self.host.clone(),
            user: self.user.clone(),
            database: self.database.clone().unwrap_or_default(),
        }
    }

    /// Check the preconditions for opening a connection.
    ///
    /// Host and user must be non-empty; the password may be empty and
    /// the database is optional.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(WpdbError::Configuration("host must not be empty".into()));
        }
        if self.user.trim().is_empty() {
            return Err(WpdbError::Configuration("user must not be empty".into()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ConnectionParams {
    // Password is redacted; these end up in logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Identity of a pooled connection: `(host, user, database)`.
///
/// An absent database normalizes to the empty string, so requests with
/// `database: None` and `database: Some("")` share an entry. The
/// password is deliberately not part of the identity; see the manager
/// for how a mismatch is reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionKey {
    /// Host address
    pub host: String,
    /// Username
    pub user: String,
    /// Database name, empty when none was selected
    pub database: String,
}

impl std::fmt::Display for ConnectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.user, self.host)?;
        if !self.database.is_empty() {
            write!(f, "/{}", self.database)?;
        }
        Ok(())
    }
}
