//! Driver collaborator contract.
//!
//! The builder never talks to a database directly. It renders SQL plus
//! an ordered parameter list and hands both to a [`Driver`], which owns
//! the connection, the wire protocol and result materialization. Read
//! results come back as columns of nullable text; typed decoding is out
//! of scope at this layer.

use std::future::Future;

use crate::error::Result;
use crate::value::SqlValue;

/// Outcome of a write statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Number of rows the statement affected.
    pub rows_affected: u64,
    /// Generated identifier for inserts, when the backend reports one.
    pub last_insert_id: Option<i64>,
}

/// Outcome of a read statement: column names plus per-row nullable
/// text values, one per column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryOutcome {
    /// Result column names, in output order.
    pub columns: Vec<String>,
    /// Result rows; `None` is a SQL NULL.
    pub rows: Vec<Vec<Option<String>>>,
}

/// A database driver able to run parameterized statements.
///
/// Implementations surface transport failures as
/// [`DaoError::Execution`](crate::DaoError::Execution); no retry or
/// recovery happens at this layer. A row that cannot be mapped to text
/// is skipped rather than failing the whole query. Drivers are used
/// through shared references held across await points and must be
/// thread-safe.
pub trait Driver: Send + Sync {
    /// Executes a write statement.
    fn execute(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> impl Future<Output = Result<ExecOutcome>> + Send;

    /// Executes a read statement.
    fn query(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> impl Future<Output = Result<QueryOutcome>> + Send;
}
