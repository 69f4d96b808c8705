//! MySQL connection implementation

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use async_trait::async_trait;
use chrono::{Datelike, Timelike};
use mysql_async::{Conn, Opts, OptsBuilder, Params, Row as MySqlRow, prelude::*};
use tokio::sync::Mutex;
use wpdb_core::{Connection, QueryResult, Result, Row, Value, WpdbError};
use wpdb_connection::ConnectionParams;

/// Default MySQL port, used when the host string carries none
const DEFAULT_PORT: u16 = 3306;

/// MySQL connection wrapper over a single physical connection.
///
/// Pooling happens in the connection manager, so each instance owns
/// exactly one `mysql_async::Conn`. Statements are executed through the
/// binary protocol (server-side prepared statements).
#[derive(Debug)]
pub struct MySqlConnection {
    conn: Mutex<Option<Conn>>,
    closed: AtomicBool,
}

impl MySqlConnection {
    /// Open a connection to a MySQL server.
    ///
    /// The host accepts the wp-config `DB_HOST` convention of
    /// `host:port`; a bare host uses port 3306.
    pub async fn connect(params: &ConnectionParams) -> Result<Self> {
        let (host, port) = split_host_port(&params.host);
        tracing::info!(host = %host, port = port, database = ?params.database, "connecting to MySQL database");

        let mut opts_builder = OptsBuilder::from_opts(Opts::default())
            .ip_or_hostname(host)
            .tcp_port(port)
            .user(Some(params.user.clone()))
            .pass(Some(params.password.clone()));

        if let Some(db) = params.database.as_deref().filter(|db| !db.is_empty()) {
            opts_builder = opts_builder.db_name(Some(db));
        }

        let conn = Conn::new(Opts::from(opts_builder))
            .await
            .map_err(connect_error)?;

        tracing::info!(host = %params.host, "MySQL connection established");
        Ok(Self {
            conn: Mutex::new(Some(conn)),
            closed: AtomicBool::new(false),
        })
    }
}

/// Split a wp-config style `host:port` string, falling back to 3306
fn split_host_port(host: &str) -> (&str, u16) {
    match host.rsplit_once(':') {
        Some((name, port)) => match port.parse::<u16>() {
            Ok(port) => (name, port),
            Err(_) => (host, DEFAULT_PORT),
        },
        None => (host, DEFAULT_PORT),
    }
}

/// Map a connect-time driver error to `ConnectionFailed`, preserving
/// the server error number when the server reported one
fn connect_error(err: mysql_async::Error) -> WpdbError {
    match &err {
        mysql_async::Error::Server(server) => {
            WpdbError::connection_failed(server.message.clone(), Some(server.code))
        }
        other => WpdbError::connection_failed(other.to_string(), None),
    }
}

/// Convert statement parameters to mysql_async positional params
fn to_mysql_params(params: &[Value]) -> Params {
    if params.is_empty() {
        Params::Empty
    } else {
        Params::Positional(params.iter().map(value_to_mysql).collect())
    }
}

fn value_to_mysql(value: &Value) -> mysql_async::Value {
    match value {
        Value::Null => mysql_async::Value::NULL,
        Value::Bool(v) => mysql_async::Value::Int(*v as i64),
        Value::Int64(v) => mysql_async::Value::Int(*v),
        Value::UInt64(v) => mysql_async::Value::UInt(*v),
        Value::Float64(v) => mysql_async::Value::Double(*v),
        Value::String(v) => mysql_async::Value::Bytes(v.as_bytes().to_vec()),
        Value::Bytes(v) => mysql_async::Value::Bytes(v.clone()),
        Value::Date(v) => mysql_async::Value::Date(
            v.year() as u16,
            v.month() as u8,
            v.day() as u8,
            0,
            0,
            0,
            0,
        ),
        Value::DateTime(v) => mysql_async::Value::Date(
            v.year() as u16,
            v.month() as u8,
            v.day() as u8,
            v.hour() as u8,
            v.minute() as u8,
            v.second() as u8,
            v.and_utc().timestamp_subsec_micros(),
        ),
    }
}

/// Convert a mysql_async value from the binary protocol to our Value
fn mysql_value_to_value(val: mysql_async::Value) -> Value {
    match val {
        mysql_async::Value::NULL => Value::Null,
        mysql_async::Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(s) => Value::String(s),
            Err(e) => Value::Bytes(e.into_bytes()),
        },
        mysql_async::Value::Int(i) => Value::Int64(i),
        mysql_async::Value::UInt(u) => Value::UInt64(u),
        mysql_async::Value::Float(f) => Value::Float64(f as f64),
        mysql_async::Value::Double(d) => Value::Float64(d),
        mysql_async::Value::Date(year, month, day, hour, min, sec, micro) => {
            let date = chrono::NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32);
            match date {
                Some(date) if hour == 0 && min == 0 && sec == 0 && micro == 0 => Value::Date(date),
                Some(date) => date
                    .and_hms_micro_opt(hour as u32, min as u32, sec as u32, micro)
                    .map(Value::DateTime)
                    .unwrap_or_else(|| {
                        Value::String(format!(
                            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                            year, month, day, hour, min, sec
                        ))
                    }),
                None => Value::String(format!("{:04}-{:02}-{:02}", year, month, day)),
            }
        }
        mysql_async::Value::Time(negative, days, hours, mins, secs, micros) => {
            let total_hours = (days as u32) * 24 + (hours as u32);
            let sign = if negative { "-" } else { "" };
            Value::String(format!(
                "{}{:02}:{:02}:{:02}.{:06}",
                sign, total_hours, mins, secs, micros
            ))
        }
    }
}

#[async_trait]
impl Connection for MySqlConnection {
    fn driver_name(&self) -> &str {
        "mysql"
    }

    #[tracing::instrument(skip(self, sql, params), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| WpdbError::Driver("connection is closed".into()))?;

        conn.exec_drop(sql, to_mysql_params(params))
            .await
            .map_err(|e| WpdbError::Query(format!("Failed to execute statement: {}", e)))?;

        let affected_rows = conn.affected_rows();
        tracing::debug!(affected_rows, "statement executed");
        Ok(affected_rows)
    }

    #[tracing::instrument(skip(self, sql, params), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let start = Instant::now();
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| WpdbError::Driver("connection is closed".into()))?;

        let mysql_rows: Vec<MySqlRow> = conn
            .exec(sql, to_mysql_params(params))
            .await
            .map_err(|e| WpdbError::Query(format!("Failed to execute query: {}", e)))?;

        let columns: Vec<String> = mysql_rows
            .first()
            .map(|row| {
                row.columns_ref()
                    .iter()
                    .map(|col| col.name_str().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let rows = mysql_rows
            .into_iter()
            .map(|row| {
                let values = row.unwrap().into_iter().map(mysql_value_to_value).collect();
                Row::new(columns.clone(), values)
            })
            .collect::<Vec<_>>();

        tracing::debug!(row_count = rows.len(), "query executed");
        Ok(QueryResult {
            columns,
            rows,
            execution_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn ping(&self) -> Result<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| WpdbError::Driver("connection is closed".into()))?;
        conn.ping()
            .await
            .map_err(|e| WpdbError::Driver(format!("Ping failed: {}", e)))
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        let conn = self.conn.lock().await.take();
        if let Some(conn) = conn {
            conn.disconnect()
                .await
                .map_err(|e| WpdbError::Driver(format!("Failed to disconnect: {}", e)))?;
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_port_splitting() {
        assert_eq!(split_host_port("localhost"), ("localhost", 3306));
        assert_eq!(split_host_port("localhost:33060"), ("localhost", 33060));
        assert_eq!(split_host_port("db.lndo.site:3307"), ("db.lndo.site", 3307));
        // Not a port suffix; keep the whole string as host.
        assert_eq!(split_host_port("localhost:socket"), ("localhost:socket", 3306));
    }

    #[test]
    fn params_conversion() {
        assert!(matches!(to_mysql_params(&[]), Params::Empty));

        let params = to_mysql_params(&[
            Value::Int64(-5),
            Value::String("siteurl".into()),
            Value::Null,
        ]);
        match params {
            Params::Positional(values) => {
                assert_eq!(values[0], mysql_async::Value::Int(-5));
                assert_eq!(values[1], mysql_async::Value::Bytes(b"siteurl".to_vec()));
                assert_eq!(values[2], mysql_async::Value::NULL);
            }
            other => panic!("unexpected params: {other:?}"),
        }
    }

    #[test]
    fn mysql_values_round_into_core_values() {
        assert_eq!(
            mysql_value_to_value(mysql_async::Value::Int(7)),
            Value::Int64(7)
        );
        assert_eq!(
            mysql_value_to_value(mysql_async::Value::UInt(7)),
            Value::UInt64(7)
        );
        assert_eq!(
            mysql_value_to_value(mysql_async::Value::Bytes(b"hello".to_vec())),
            Value::String("hello".into())
        );
        assert_eq!(mysql_value_to_value(mysql_async::Value::NULL), Value::Null);

        let date = mysql_value_to_value(mysql_async::Value::Date(2024, 6, 1, 0, 0, 0, 0));
        assert_eq!(
            date,
            Value::Date(chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        );

        let datetime = mysql_value_to_value(mysql_async::Value::Date(2024, 6, 1, 12, 30, 15, 0));
        match datetime {
            Value::DateTime(dt) => {
                assert_eq!(dt.hour(), 12);
                assert_eq!(dt.minute(), 30);
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn bool_and_dates_map_to_mysql() {
        assert_eq!(value_to_mysql(&Value::Bool(true)), mysql_async::Value::Int(1));
        let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            value_to_mysql(&Value::Date(date)),
            mysql_async::Value::Date(2024, 6, 1, 0, 0, 0, 0)
        );
    }
}
