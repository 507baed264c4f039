// gatekeeper-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime};
use duckdb::types::{TimeUnit, Value};
use duckdb::{AccessMode, Config, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::quality::ScalarValue;
use crate::error::GatekeeperError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::executor::QueryExecutor;

pub const IN_MEMORY: &str = ":memory:";

pub struct DuckDBExecutor {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDBExecutor {
    /// Read-write handle; `:memory:` gives a private in-memory database.
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();
        let conn = if db_path == IN_MEMORY {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };
        Ok(Self::from_connection(conn))
    }

    /// Read-only handle on an existing database file. Used for scheduled checks.
    pub fn open_read_only(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default().access_mode(AccessMode::ReadOnly)?;
        let conn = Connection::open_with_flags(db_path, config)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs statements that return nothing (setup, seeding).
    pub fn execute_batch(&self, sql: &str) -> Result<(), InfrastructureError> {
        let conn = self.lock()?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, InfrastructureError> {
        self.conn
            .lock()
            .map_err(|_| InfrastructureError::Database(DatabaseError::Poisoned))
    }
}

#[async_trait]
impl QueryExecutor for DuckDBExecutor {
    async fn execute_scalar(&self, query: &str) -> Result<ScalarValue, GatekeeperError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query).map_err(InfrastructureError::from)?;
        let mut rows = stmt.query([]).map_err(InfrastructureError::from)?;

        let row = rows
            .next()
            .map_err(InfrastructureError::from)?
            .ok_or_else(|| {
                InfrastructureError::Database(DatabaseError::EmptyResult(query.to_string()))
            })?;

        let value: Value = row.get(0).map_err(InfrastructureError::from)?;
        Ok(to_scalar(value))
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}

fn to_scalar(value: Value) -> ScalarValue {
    match value {
        Value::Null => ScalarValue::Null,
        Value::Boolean(b) => ScalarValue::Bool(b),
        Value::TinyInt(i) => ScalarValue::Int(i.into()),
        Value::SmallInt(i) => ScalarValue::Int(i.into()),
        Value::Int(i) => ScalarValue::Int(i.into()),
        Value::BigInt(i) => ScalarValue::Int(i),
        Value::UTinyInt(u) => ScalarValue::Int(u.into()),
        Value::USmallInt(u) => ScalarValue::Int(u.into()),
        Value::UInt(u) => ScalarValue::Int(u.into()),
        // SUM() over integers yields HUGEINT
        Value::HugeInt(i) => i64::try_from(i)
            .map(ScalarValue::Int)
            .unwrap_or(ScalarValue::Float(i as f64)),
        Value::UBigInt(u) => i64::try_from(u)
            .map(ScalarValue::Int)
            .unwrap_or(ScalarValue::Float(u as f64)),
        Value::Float(f) => ScalarValue::Float(f.into()),
        Value::Double(f) => ScalarValue::Float(f),
        Value::Decimal(d) => d
            .to_string()
            .parse::<f64>()
            .map(ScalarValue::Float)
            .unwrap_or_else(|_| ScalarValue::Text(d.to_string())),
        Value::Text(s) | Value::Enum(s) => ScalarValue::Text(s),
        Value::Date32(days) => temporal(render_date(days), days),
        Value::Timestamp(unit, raw) => temporal(render_timestamp(unit, raw), raw),
        Value::Time64(unit, raw) => temporal(render_time(unit, raw), raw),
        other => ScalarValue::Text(format!("{:?}", other)),
    }
}

// Temporal values are rendered as ISO-8601 text, matching arrow's display of
// Date32 / Timestamp / Time64 so both engines compare the same.
const ISO_DATE: &str = "%Y-%m-%d";
const ISO_DATETIME: &str = "%Y-%m-%dT%H:%M:%S%.f";
const ISO_TIME: &str = "%H:%M:%S%.f";

/// Out-of-range values keep their raw number.
fn temporal(rendered: Option<String>, raw: impl ToString) -> ScalarValue {
    ScalarValue::Text(rendered.unwrap_or_else(|| raw.to_string()))
}

fn to_micros(unit: TimeUnit, raw: i64) -> i64 {
    match unit {
        TimeUnit::Second => raw.saturating_mul(1_000_000),
        TimeUnit::Millisecond => raw.saturating_mul(1_000),
        TimeUnit::Microsecond => raw,
        TimeUnit::Nanosecond => raw / 1_000,
    }
}

fn to_nanos(unit: TimeUnit, raw: i64) -> i64 {
    match unit {
        TimeUnit::Second => raw.saturating_mul(1_000_000_000),
        TimeUnit::Millisecond => raw.saturating_mul(1_000_000),
        TimeUnit::Microsecond => raw.saturating_mul(1_000),
        TimeUnit::Nanosecond => raw,
    }
}

fn render_date(days: i32) -> Option<String> {
    DateTime::from_timestamp(i64::from(days) * 86_400, 0)
        .map(|dt| dt.date_naive().format(ISO_DATE).to_string())
}

fn render_timestamp(unit: TimeUnit, raw: i64) -> Option<String> {
    DateTime::from_timestamp_micros(to_micros(unit, raw))
        .map(|dt| dt.naive_utc().format(ISO_DATETIME).to_string())
}

fn render_time(unit: TimeUnit, raw: i64) -> Option<String> {
    let nanos = to_nanos(unit, raw);
    let secs = u32::try_from(nanos.div_euclid(1_000_000_000)).ok()?;
    let frac = u32::try_from(nanos.rem_euclid(1_000_000_000)).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, frac)
        .map(|t| t.format(ISO_TIME).to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn seeded() -> Result<DuckDBExecutor> {
        let executor = DuckDBExecutor::new(IN_MEMORY)?;
        executor.execute_batch(
            "CREATE SCHEMA IF NOT EXISTS public;
             CREATE TABLE public.users (userid INTEGER, first_name VARCHAR, level VARCHAR, weight DECIMAL(5,2));
             INSERT INTO public.users VALUES
                (1, 'Lily', 'paid', 1.50),
                (2, 'Ryan', 'free', 2.25),
                (3, NULL, 'free', 0.25);",
        )?;
        Ok(executor)
    }

    #[tokio::test]
    async fn test_count_is_int() -> Result<()> {
        let executor = seeded()?;
        let value = executor
            .execute_scalar("SELECT COUNT(*) FROM public.users")
            .await?;
        assert_eq!(value, ScalarValue::Int(3));
        Ok(())
    }

    #[tokio::test]
    async fn test_value_types() -> Result<()> {
        let executor = seeded()?;

        let sum = executor
            .execute_scalar("SELECT SUM(userid) FROM public.users")
            .await?;
        assert_eq!(sum, ScalarValue::Int(6));

        let avg = executor
            .execute_scalar("SELECT AVG(userid) FROM public.users")
            .await?;
        assert_eq!(avg, ScalarValue::Float(2.0));

        let weight = executor
            .execute_scalar("SELECT SUM(weight) FROM public.users")
            .await?;
        assert_eq!(weight, ScalarValue::Float(4.0));

        let level = executor
            .execute_scalar("SELECT MAX(level) FROM public.users")
            .await?;
        assert_eq!(level, ScalarValue::Text("paid".into()));

        let missing = executor
            .execute_scalar("SELECT first_name FROM public.users WHERE userid = 3")
            .await?;
        assert_eq!(missing, ScalarValue::Null);
        Ok(())
    }

    #[tokio::test]
    async fn test_temporal_values_are_iso_text() -> Result<()> {
        let executor = DuckDBExecutor::new(IN_MEMORY)?;

        let date = executor.execute_scalar("SELECT DATE '2018-11-01'").await?;
        assert_eq!(date, ScalarValue::Text("2018-11-01".into()));

        let ts = executor
            .execute_scalar("SELECT TIMESTAMP '2018-11-01 21:01:46.796'")
            .await?;
        assert_eq!(ts, ScalarValue::Text("2018-11-01T21:01:46.796".into()));

        let midnight = executor
            .execute_scalar("SELECT TIMESTAMP '2018-11-15 00:00:00'")
            .await?;
        assert_eq!(midnight, ScalarValue::Text("2018-11-15T00:00:00".into()));

        let time = executor.execute_scalar("SELECT TIME '21:01:46'").await?;
        assert_eq!(time, ScalarValue::Text("21:01:46".into()));

        // A configured failure date matches the rendered value
        assert_eq!(date, ScalarValue::from("2018-11-01"));
        Ok(())
    }

    #[test]
    fn test_temporal_rendering_units() {
        assert_eq!(render_date(17836).as_deref(), Some("2018-11-01"));
        assert_eq!(render_date(-1).as_deref(), Some("1969-12-31"));
        assert_eq!(
            render_timestamp(TimeUnit::Second, 1_541_106_106).as_deref(),
            Some("2018-11-01T21:01:46")
        );
        assert_eq!(
            render_timestamp(TimeUnit::Nanosecond, 1_541_106_106_796_000_000).as_deref(),
            Some("2018-11-01T21:01:46.796")
        );
        assert_eq!(
            render_time(TimeUnit::Microsecond, 75_706_500_000).as_deref(),
            Some("21:01:46.500")
        );
        assert_eq!(render_time(TimeUnit::Second, 90_000), None);
    }

    #[tokio::test]
    async fn test_zero_rows_is_an_error() -> Result<()> {
        let executor = seeded()?;
        let res = executor
            .execute_scalar("SELECT userid FROM public.users WHERE userid > 100")
            .await;
        assert!(matches!(
            res,
            Err(GatekeeperError::Infrastructure(InfrastructureError::Database(
                DatabaseError::EmptyResult(_)
            )))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_table_is_an_error() -> Result<()> {
        let executor = DuckDBExecutor::new(IN_MEMORY)?;
        let res = executor
            .execute_scalar("SELECT COUNT(*) FROM public.non_existent_table")
            .await;
        assert!(matches!(
            res,
            Err(GatekeeperError::Infrastructure(InfrastructureError::Database(
                DatabaseError::DuckDB(_)
            )))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_read_only_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("warehouse.duckdb");
        let path = path.to_str().expect("utf-8 temp path");

        {
            let writer = DuckDBExecutor::new(path)?;
            writer.execute_batch("CREATE TABLE songs AS SELECT 1 AS song_id")?;
        }

        let reader = DuckDBExecutor::open_read_only(path)?;
        assert_eq!(
            reader.execute_scalar("SELECT COUNT(*) FROM songs").await?,
            ScalarValue::Int(1)
        );
        assert!(reader.execute_batch("DROP TABLE songs").is_err());
        Ok(())
    }
}
