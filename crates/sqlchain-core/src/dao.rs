//! The DAO front object: fluent configuration plus terminal execution.
//!
//! A [`Dao`] pairs one [`Statement`] with a [`Driver`]. Chained calls
//! accumulate clauses; a terminal call renders the statement, hands it
//! to the driver and unconditionally clears the accumulated state, so
//! the same instance can start the next statement whether the terminal
//! succeeded or failed.

use std::mem;
use std::sync::Arc;

use crate::driver::Driver;
use crate::error::{DaoError, Result};
use crate::ident::FieldExpr;
use crate::row::TextRow;
use crate::statement::Statement;
use crate::value::{SqlValue, ToSqlValue};

/// A reusable statement builder bound to a database driver.
///
/// Not meant for concurrent mutation: configuration calls and the
/// terminal call belong to one logical sequence of operations.
///
/// # Example
///
/// ```ignore
/// let mut dao = Dao::new(driver);
/// let count = dao
///     .table("author")
///     .where_clause("id=?", params![2])
///     .update(values! { "name" => "goodnews" })
///     .await?;
/// ```
#[derive(Debug)]
pub struct Dao<D: Driver> {
    driver: D,
    stmt: Statement,
}

impl<D: Driver> Dao<D> {
    /// Creates a DAO over the given driver.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            stmt: Statement::new(),
        }
    }

    /// Returns the underlying driver.
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Returns the accumulated statement state, e.g. to render and log
    /// the SQL before a terminal call.
    pub const fn statement(&self) -> &Statement {
        &self.stmt
    }

    /// Selects the target table; the usual first call of a statement.
    pub fn table(&mut self, token: &str) -> &mut Self {
        self.stmt.table(token);
        self
    }

    /// Marks the query as `SELECT DISTINCT`.
    pub const fn distinct(&mut self) -> &mut Self {
        self.stmt.distinct();
        self
    }

    /// Sets the output columns; see [`Statement::fields`].
    pub fn fields<I, F>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldExpr>,
    {
        self.stmt.fields(fields);
        self
    }

    /// Sets the filter predicate; see [`Statement::where_clause`].
    pub fn where_clause(
        &mut self,
        condition: impl Into<String>,
        params: Vec<SqlValue>,
    ) -> &mut Self {
        self.stmt.where_clause(condition, params);
        self
    }

    /// Appends a join clause of the given kind.
    pub fn join(&mut self, kind: &str, table: &str, on: &str, params: Vec<SqlValue>) -> &mut Self {
        self.stmt.join(kind, table, on, params);
        self
    }

    /// Appends a `LEFT JOIN`.
    pub fn left_join(&mut self, table: &str, on: &str, params: Vec<SqlValue>) -> &mut Self {
        self.stmt.left_join(table, on, params);
        self
    }

    /// Appends a `RIGHT JOIN`.
    pub fn right_join(&mut self, table: &str, on: &str, params: Vec<SqlValue>) -> &mut Self {
        self.stmt.right_join(table, on, params);
        self
    }

    /// Sets the grouping columns.
    pub fn group_by<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stmt.group_by(columns);
        self
    }

    /// Sets the ordering columns.
    pub fn order_by<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stmt.order_by(columns);
        self
    }

    /// Sets the post-aggregation predicate.
    pub fn having(&mut self, condition: impl Into<String>, params: Vec<SqlValue>) -> &mut Self {
        self.stmt.having(condition, params);
        self
    }

    /// Limits the number of result rows.
    pub const fn limit(&mut self, n: u64) -> &mut Self {
        self.stmt.limit(n);
        self
    }

    /// Skips the first `n` result rows; only rendered together with a
    /// limit.
    pub const fn offset(&mut self, n: u64) -> &mut Self {
        self.stmt.offset(n);
        self
    }

    // Terminal operations. Each takes the accumulated statement out of
    // the builder before anything can fail, so state is cleared exactly
    // once per terminal call regardless of the outcome.

    /// Inserts one row and returns the generated identifier.
    ///
    /// # Errors
    ///
    /// [`DaoError::Configuration`] when no table was selected or the
    /// field map is empty, [`DaoError::Execution`] when the driver
    /// fails, and [`DaoError::IdentityUnavailable`] when the statement
    /// ran but the backend reported no generated id.
    pub async fn insert<K, V, I>(&mut self, fields: I) -> Result<i64>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToSqlValue,
    {
        let stmt = mem::take(&mut self.stmt);
        let assignments = fields
            .into_iter()
            .map(|(col, value)| (col.into(), value.to_sql_value()))
            .collect();
        let (sql, params) = stmt.render_insert(assignments)?;
        let outcome = self.driver.execute(&sql, &params).await?;
        outcome.last_insert_id.ok_or(DaoError::IdentityUnavailable)
    }

    /// Updates matching rows and returns the affected-row count.
    /// Zero affected rows is a valid outcome, not an error.
    ///
    /// # Errors
    ///
    /// [`DaoError::Configuration`] when no table was selected or the
    /// field map is empty, [`DaoError::Execution`] when the driver
    /// fails.
    pub async fn update<K, V, I>(&mut self, fields: I) -> Result<u64>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToSqlValue,
    {
        let stmt = mem::take(&mut self.stmt);
        let assignments = fields
            .into_iter()
            .map(|(col, value)| (col.into(), value.to_sql_value()))
            .collect();
        let (sql, params) = stmt.render_update(assignments)?;
        let outcome = self.driver.execute(&sql, &params).await?;
        Ok(outcome.rows_affected)
    }

    /// Deletes matching rows and returns the affected-row count.
    ///
    /// An empty filter deletes every row; the builder does not block
    /// that. Callers wanting a guard must supply an explicit predicate.
    ///
    /// # Errors
    ///
    /// [`DaoError::Configuration`] when no table was selected,
    /// [`DaoError::Execution`] when the driver fails.
    pub async fn delete(&mut self) -> Result<u64> {
        let stmt = mem::take(&mut self.stmt);
        let (sql, params) = stmt.render_delete()?;
        let outcome = self.driver.execute(&sql, &params).await?;
        Ok(outcome.rows_affected)
    }

    /// Runs the query and returns all matching rows as text, NULLs as
    /// empty strings.
    ///
    /// # Errors
    ///
    /// [`DaoError::Configuration`] when no table was selected,
    /// [`DaoError::Execution`] when the driver fails.
    pub async fn rows(&mut self) -> Result<Vec<TextRow>> {
        let stmt = mem::take(&mut self.stmt);
        self.fetch(stmt).await
    }

    /// Runs the query with an implicit `LIMIT 1` and returns the first
    /// row, if any.
    ///
    /// # Errors
    ///
    /// Same as [`Dao::rows`].
    pub async fn row(&mut self) -> Result<Option<TextRow>> {
        self.stmt.limit(1);
        let stmt = mem::take(&mut self.stmt);
        let rows = self.fetch(stmt).await?;
        Ok(rows.into_iter().next())
    }

    /// Runs the query and returns the first output column across all
    /// result rows.
    ///
    /// # Errors
    ///
    /// Same as [`Dao::rows`].
    pub async fn column(&mut self) -> Result<Vec<String>> {
        let stmt = mem::take(&mut self.stmt);
        let rows = self.fetch(stmt).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.values().first().cloned())
            .collect())
    }

    /// Runs the query with an implicit `LIMIT 1` and returns the first
    /// column of the first row, or an empty string when nothing
    /// matched.
    ///
    /// # Errors
    ///
    /// Same as [`Dao::rows`].
    pub async fn value(&mut self) -> Result<String> {
        self.stmt.limit(1);
        let stmt = mem::take(&mut self.stmt);
        let rows = self.fetch(stmt).await?;
        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.values().first().cloned())
            .unwrap_or_default())
    }

    async fn fetch(&self, stmt: Statement) -> Result<Vec<TextRow>> {
        let (sql, params) = stmt.render_select()?;
        let outcome = self.driver.query(&sql, &params).await?;
        let columns: Arc<[String]> = outcome.columns.into();
        Ok(outcome
            .rows
            .into_iter()
            .map(|row| {
                let values = row
                    .into_iter()
                    .map(Option::unwrap_or_default)
                    .collect();
                TextRow::new(Arc::clone(&columns), values)
            })
            .collect())
    }
}
