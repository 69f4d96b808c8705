//! Tests for connection health checking

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use wpdb_core::{Connection, QueryResult, Result, Value, WpdbError};

use super::ping::{PingError, ping_database};

#[derive(Debug)]
struct MockConnection {
    closed: AtomicBool,
    ping_fails: AtomicBool,
}

impl MockConnection {
    fn new() -> Self {
        Self {
            closed: AtomicBool::new(false),
            ping_fails: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Connection for MockConnection {
    fn driver_name(&self) -> &str {
        "mock"
    }

    async fn execute(&self, _sql: &str, _params: &[Value]) -> Result<u64> {
        Ok(0)
    }

    async fn query(&self, _sql: &str, _params: &[Value]) -> Result<QueryResult> {
        Ok(QueryResult::empty())
    }

    async fn ping(&self) -> Result<()> {
        if self.ping_fails.load(Ordering::SeqCst) {
            return Err(WpdbError::Driver("server has gone away".into()));
        }
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[tokio::test]
async fn ping_live_connection_returns_latency() {
    let conn = MockConnection::new();
    let latency = ping_database(&conn).await.expect("ping should succeed");
    assert!(latency.as_secs() < 1);
}

#[tokio::test]
async fn ping_closed_connection_fails_fast() {
    let conn = MockConnection::new();
    conn.close().await.expect("close");

    let err = ping_database(&conn).await.expect_err("ping should fail");
    assert!(matches!(err, PingError::ConnectionClosed));
}

#[tokio::test]
async fn ping_failure_carries_driver_message() {
    let conn = MockConnection::new();
    conn.ping_fails.store(true, Ordering::SeqCst);

    let err = ping_database(&conn).await.expect_err("ping should fail");
    match err {
        PingError::PingFailed(msg) => assert!(msg.contains("server has gone away")),
        other => panic!("unexpected error: {other}"),
    }
}
