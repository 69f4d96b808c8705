//! Error types for wpdb

use thiserror::Error;

/// Core error type for wpdb operations
#[derive(Error, Debug)]
pub enum WpdbError {
    /// Opening a new physical connection failed.
    ///
    /// This is the only failure the connection manager surfaces to
    /// callers; `code` is the server error number when the driver
    /// reported one.
    #[error("connection failed: {message}")]
    ConnectionFailed {
        message: String,
        code: Option<u16>,
    },

    #[error("Query error: {0}")]
    Query(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    Other(String),
}

impl WpdbError {
    /// Build a `ConnectionFailed` from a driver message and optional
    /// server error number.
    pub fn connection_failed(message: impl Into<String>, code: Option<u16>) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
            code,
        }
    }

    /// True if this is a `ConnectionFailed` error.
    pub fn is_connection_failed(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. })
    }
}

/// Result type alias for wpdb operations
pub type Result<T> = std::result::Result<T, WpdbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_failed_carries_code() {
        let err = WpdbError::connection_failed("Access denied for user 'wp'@'localhost'", Some(1045));
        match &err {
            WpdbError::ConnectionFailed { message, code } => {
                assert!(message.contains("Access denied"));
                assert_eq!(*code, Some(1045));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
        assert!(err.is_connection_failed());
        assert!(err.to_string().contains("Access denied"));
    }

    #[test]
    fn other_variants_are_not_connection_failed() {
        assert!(!WpdbError::Configuration("host must not be empty".into()).is_connection_failed());
        assert!(!WpdbError::Query("syntax error".into()).is_connection_failed());
    }
}
