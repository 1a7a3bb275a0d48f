//! sqlx-backed MySQL driver.

use sqlchain_core::{DaoError, Driver, ExecOutcome, QueryOutcome, Result, SqlValue};
use sqlx::mysql::{MySqlArguments, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, MySql, Row};
use tracing::{debug, warn};

use crate::config::ConnectConfig;

/// Runs rendered statements against a MySQL connection pool.
#[derive(Debug, Clone)]
pub struct MySqlDriver {
    pool: MySqlPool,
}

impl MySqlDriver {
    /// Wraps an existing pool.
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Connects to the server described by `config` and verifies the
    /// connection with a ping.
    ///
    /// # Errors
    ///
    /// Returns [`DaoError::Execution`] when the server is unreachable
    /// or rejects the credentials.
    pub async fn connect(config: &ConnectConfig) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .connect_with(config.options())
            .await
            .map_err(DaoError::execution)?;
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(DaoError::execution)?;
        debug!(host = %config.host, database = %config.database, "connected");
        Ok(Self::new(pool))
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

impl Driver for MySqlDriver {
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<ExecOutcome> {
        debug!(%sql, params = params.len(), "executing statement");
        let mut query = sqlx::query(sql);
        for value in params {
            query = bind_value(query, value.clone());
        }
        let result = query
            .execute(&self.pool)
            .await
            .map_err(DaoError::execution)?;
        // MySQL reports 0 when the statement generated no id.
        let last_insert_id = match result.last_insert_id() {
            0 => None,
            id => i64::try_from(id).ok(),
        };
        Ok(ExecOutcome {
            rows_affected: result.rows_affected(),
            last_insert_id,
        })
    }

    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<QueryOutcome> {
        debug!(%sql, params = params.len(), "running query");
        let mut query = sqlx::query(sql);
        for value in params {
            query = bind_value(query, value.clone());
        }
        let fetched = query
            .fetch_all(&self.pool)
            .await
            .map_err(DaoError::execution)?;

        let columns = fetched.first().map_or_else(Vec::new, |row| {
            row.columns()
                .iter()
                .map(|c| String::from(c.name()))
                .collect()
        });

        let rows = collect_rows(fetched.iter().map(row_text));
        Ok(QueryOutcome { columns, rows })
    }
}

fn bind_value<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    value: SqlValue,
) -> Query<'q, MySql, MySqlArguments> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Bytes(b) => query.bind(b),
    }
}

/// Keeps the rows that decoded, dropping the ones that did not. The
/// partial result set is still returned as a success.
fn collect_rows<E: std::fmt::Display>(
    decoded: impl IntoIterator<Item = std::result::Result<Vec<Option<String>>, E>>,
) -> Vec<Vec<Option<String>>> {
    let mut rows = Vec::new();
    for row in decoded {
        match row {
            Ok(values) => rows.push(values),
            Err(err) => warn!(error = %err, "skipping undecodable row"),
        }
    }
    rows
}

fn row_text(row: &MySqlRow) -> std::result::Result<Vec<Option<String>>, sqlx::Error> {
    (0..row.len()).map(|index| cell_text(row, index)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(String::from(*v))).collect()
    }

    #[test]
    fn test_collect_rows_drops_undecodable_row() {
        let decoded: Vec<std::result::Result<_, String>> = vec![
            Ok(text_row(&["1", "ascii"])),
            Err(String::from("bad column value")),
            Ok(text_row(&["3", "utf8"])),
        ];
        let rows = collect_rows(decoded);
        assert_eq!(rows, vec![text_row(&["1", "ascii"]), text_row(&["3", "utf8"])]);
    }

    #[test]
    fn test_collect_rows_keeps_all_good_rows() {
        let decoded: Vec<std::result::Result<_, String>> =
            vec![Ok(text_row(&["1"])), Ok(vec![None])];
        let rows = collect_rows(decoded);
        assert_eq!(rows, vec![text_row(&["1"]), vec![None]]);
    }
}

/// Decodes one cell to nullable text, trying the common MySQL column
/// types in turn.
fn cell_text(row: &MySqlRow, index: usize) -> std::result::Result<Option<String>, sqlx::Error> {
    if let Ok(v) = row.try_get::<Option<String>, _>(index) {
        return Ok(v);
    }
    if let Ok(v) = row.try_get::<Option<i64>, _>(index) {
        return Ok(v.map(|n| n.to_string()));
    }
    if let Ok(v) = row.try_get::<Option<u64>, _>(index) {
        return Ok(v.map(|n| n.to_string()));
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(index) {
        return Ok(v.map(|n| n.to_string()));
    }
    if let Ok(v) = row.try_get::<Option<chrono::NaiveDateTime>, _>(index) {
        return Ok(v.map(|t| t.to_string()));
    }
    if let Ok(v) = row.try_get::<Option<chrono::NaiveDate>, _>(index) {
        return Ok(v.map(|d| d.to_string()));
    }
    if let Ok(v) = row.try_get::<Option<chrono::NaiveTime>, _>(index) {
        return Ok(v.map(|t| t.to_string()));
    }
    row.try_get::<Option<Vec<u8>>, _>(index)
        .map(|v| v.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}
