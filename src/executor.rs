//! Async SQL executor used by the CRUD helper, and its sqlx SQLite implementation.

use crate::error::AppError;
use crate::sql::SqliteBindValue;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use std::str::FromStr;

/// Three primitives over a parameterized statement. Rows are JSON objects keyed by column name.
///
/// Implementations own their connection handling; the helper only awaits these calls.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Execute a statement without result rows. Returns the number of rows changed.
    async fn run(&self, sql: &str, params: &[Value]) -> Result<u64, AppError>;

    /// Fetch the first row, if any.
    async fn get(&self, sql: &str, params: &[Value]) -> Result<Option<Value>, AppError>;

    /// Fetch all rows.
    async fn all(&self, sql: &str, params: &[Value]) -> Result<Vec<Value>, AppError>;
}

#[derive(Clone)]
pub struct SqliteExecutor {
    pool: SqlitePool,
}

impl SqliteExecutor {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteExecutor { pool }
    }

    /// Open a pool for `database_url`, creating the database file if missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(SqliteExecutor { pool })
    }
}

fn bind_all<'q>(sql: &'q str, params: &[Value]) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    let mut query = sqlx::query(sql);
    for p in params {
        query = query.bind(SqliteBindValue::from_json(p));
    }
    query
}

#[async_trait]
impl SqlExecutor for SqliteExecutor {
    async fn run(&self, sql: &str, params: &[Value]) -> Result<u64, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "execute");
        let done = bind_all(sql, params).execute(&self.pool).await?;
        Ok(done.rows_affected())
    }

    async fn get(&self, sql: &str, params: &[Value]) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let row = bind_all(sql, params).fetch_optional(&self.pool).await?;
        Ok(row.map(|r| row_to_json(&r)))
    }

    async fn all(&self, sql: &str, params: &[Value]) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let rows = bind_all(sql, params).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }
}

fn row_to_json(row: &SqliteRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for (idx, col) in row.columns().iter().enumerate() {
        map.insert(col.name().to_string(), cell_to_value(row, idx));
    }
    Value::Object(map)
}

/// SQLite values are dynamically typed; try integer, then real, then text, then blob (as a byte array).
fn cell_to_value(row: &SqliteRow, idx: usize) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(idx) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(idx) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(idx) {
        return Value::String(s);
    }
    if let Ok(Some(bytes)) = row.try_get::<Option<Vec<u8>>, _>(idx) {
        return Value::Array(bytes.into_iter().map(Value::from).collect());
    }
    Value::Null
}
