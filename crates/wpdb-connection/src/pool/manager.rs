//! Keyed connection manager

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::Mutex;
use wpdb_core::{Connection, Result};

use crate::config::{ConnectionKey, ConnectionParams};
use crate::health::ping_database;

use super::config::PoolConfig;
use super::stats::{PoolCounters, PoolStats};

/// Factory trait for opening physical connections
#[async_trait]
pub trait ConnectionFactory: Send + Sync + 'static {
    /// Open a new physical connection for the given parameters
    async fn connect(&self, params: &ConnectionParams) -> Result<Arc<dyn Connection>>;
}

#[async_trait]
impl<T: ConnectionFactory> ConnectionFactory for Arc<T> {
    async fn connect(&self, params: &ConnectionParams) -> Result<Arc<dyn Connection>> {
        (**self).connect(params).await
    }
}

/// One pooled physical connection with its bookkeeping metadata
struct PoolEntry {
    connection: Arc<dyn Connection>,
    created_at: Instant,
    last_used: Instant,
    /// Parameters the connection was opened with. Kept for diagnostics
    /// and the password-mismatch warning, never for lookup.
    params: ConnectionParams,
}

impl PoolEntry {
    fn new(connection: Arc<dyn Connection>, params: ConnectionParams) -> Self {
        let now = Instant::now();
        Self {
            connection,
            created_at: now,
            last_used: now,
            params,
        }
    }

    fn touch(&mut self) {
        self.last_used = Instant::now();
    }
}

/// A process-wide cache of live database connections, keyed by
/// `(host, user, database)`.
///
/// At most one entry exists per key. A cached connection is validated
/// with a ping before every hand-out; a connection that fails
/// validation is silently closed and replaced. The expiry sweep runs
/// at the top of every `get_connection` call, so staleness is bounded
/// without a background task.
///
/// Callers never close a handed-out connection themselves; the
/// manager owns the lifecycle end to end.
pub struct ConnectionManager {
    config: PoolConfig,
    factory: Arc<dyn ConnectionFactory>,
    /// The whole map is one critical section per call. Contention is
    /// low (a handful of distinct keys) and the coarse lock keeps the
    /// at-most-one-entry-per-key invariant easy to uphold.
    entries: Mutex<HashMap<ConnectionKey, PoolEntry>>,
    counters: PoolCounters,
}

impl ConnectionManager {
    /// Create a manager with the default configuration
    pub fn new<F: ConnectionFactory>(factory: F) -> Self {
        Self::with_config(PoolConfig::default(), factory)
    }

    /// Create a manager with a custom configuration
    pub fn with_config<F: ConnectionFactory>(config: PoolConfig, factory: F) -> Self {
        Self {
            config,
            factory: Arc::new(factory),
            entries: Mutex::new(HashMap::new()),
            counters: PoolCounters::default(),
        }
    }

    /// Get the manager configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Get a live connection for the given parameters.
    ///
    /// Reuses the cached connection for the derived key when it passes
    /// validation; otherwise opens a new one and registers it. The
    /// returned connection is live at the moment of hand-out and stays
    /// registered under its key.
    ///
    /// The only caller-facing failure is `ConnectionFailed` from
    /// opening a new physical connection (plus `Configuration` for
    /// empty host/user). Validation and close failures are absorbed.
    #[tracing::instrument(skip(self, params), fields(host = %params.host, user = %params.user, database = ?params.database))]
    pub async fn get_connection(&self, params: &ConnectionParams) -> Result<Arc<dyn Connection>> {
        params.validate()?;

        let mut entries = self.entries.lock().await;
        self.sweep_locked(&mut entries).await;

        let key = params.key();
        if let Some(entry) = entries.get_mut(&key) {
            if entry.params.password != params.password {
                // The key ignores passwords, so this request silently
                // gets a connection authenticated with the old one.
                tracing::warn!(key = %key, "cached connection requested with a different password");
            }
            match ping_database(entry.connection.as_ref()).await {
                Ok(latency) => {
                    entry.touch();
                    self.counters.record_hit();
                    tracing::debug!(
                        key = %key,
                        latency_ms = latency.as_millis() as u64,
                        "reusing cached connection"
                    );
                    return Ok(entry.connection.clone());
                }
                Err(e) => {
                    tracing::debug!(key = %key, error = %e, "cached connection failed validation, replacing");
                    self.counters.record_invalidated();
                    if let Some(stale) = entries.remove(&key) {
                        let _ = stale.connection.close().await;
                        self.counters.record_closed();
                    }
                }
            }
        }

        self.counters.record_miss();
        let conn = self.factory.connect(params).await.inspect_err(|e| {
            tracing::error!(key = %key, error = %e, "failed to open connection");
        })?;
        self.counters.record_created();
        entries.insert(key.clone(), PoolEntry::new(conn.clone(), params.clone()));
        tracing::info!(key = %key, "connection established and registered");
        Ok(conn)
    }

    /// Close and remove one entry if present.
    ///
    /// Best-effort and idempotent: close errors are swallowed and an
    /// absent key is a no-op. Returns whether an entry was present.
    #[tracing::instrument(skip(self), fields(key = %key))]
    pub async fn close_connection(&self, key: &ConnectionKey) -> bool {
        let entry = self.entries.lock().await.remove(key);
        match entry {
            Some(entry) => {
                let _ = entry.connection.close().await;
                self.counters.record_closed();
                tracing::debug!("connection closed and removed");
                true
            }
            None => false,
        }
    }

    /// Close and remove every entry.
    ///
    /// Used at process teardown. Safe to call repeatedly and on an
    /// empty pool; close errors are swallowed.
    #[tracing::instrument(skip(self))]
    pub async fn close_all_connections(&self) {
        let drained: Vec<PoolEntry> = {
            let mut entries = self.entries.lock().await;
            entries.drain().map(|(_, entry)| entry).collect()
        };
        let count = drained.len();
        for entry in drained {
            let _ = entry.connection.close().await;
            self.counters.record_closed();
        }
        if count > 0 {
            tracing::info!(count, "closed all pooled connections");
        }
    }

    /// Run the expiry sweep once, returning how many entries were
    /// evicted.
    ///
    /// Also runs automatically at the top of every `get_connection`
    /// call.
    pub async fn sweep_expired(&self) -> usize {
        let mut entries = self.entries.lock().await;
        self.sweep_locked(&mut entries).await
    }

    /// Full scan over the pool. Acceptable because pool size is
    /// bounded by distinct (host, user, database) tuples in practice.
    async fn sweep_locked(&self, entries: &mut HashMap<ConnectionKey, PoolEntry>) -> usize {
        let idle_timeout = self.config.idle_timeout();
        let max_lifetime = self.config.max_lifetime();
        let now = Instant::now();

        let expired: Vec<ConnectionKey> = entries
            .iter()
            .filter(|(_, entry)| {
                now.duration_since(entry.last_used) > idle_timeout
                    || now.duration_since(entry.created_at) > max_lifetime
            })
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired.len();
        for key in expired {
            if let Some(entry) = entries.remove(&key) {
                tracing::debug!(
                    key = %key,
                    idle_ms = now.duration_since(entry.last_used).as_millis() as u64,
                    age_ms = now.duration_since(entry.created_at).as_millis() as u64,
                    "evicting expired connection"
                );
                let _ = entry.connection.close().await;
                self.counters.record_evicted();
                self.counters.record_closed();
            }
        }
        count
    }

    /// Number of entries currently in the pool
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Check whether the pool has no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Check whether an entry exists for the given key
    pub async fn contains(&self, key: &ConnectionKey) -> bool {
        self.entries.lock().await.contains_key(key)
    }

    /// Snapshot the manager's counters
    pub async fn stats(&self) -> PoolStats {
        let entries = self.entries.lock().await.len();
        self.counters.snapshot(entries)
    }
}
