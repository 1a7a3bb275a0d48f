//! Loosely typed result rows.

use std::sync::Arc;

/// One result row as an ordered mapping from column name to text.
///
/// Every value is text; SQL NULL is an empty string. Column order is
/// the statement's output order, and the column list is shared between
/// the rows of one result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRow {
    columns: Arc<[String]>,
    values: Vec<String>,
}

impl TextRow {
    pub(crate) const fn new(columns: Arc<[String]>, values: Vec<String>) -> Self {
        Self { columns, values }
    }

    /// Returns the value of the named column, or `None` when the
    /// column is not part of the result.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    /// Result column names, in output order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row values, in column order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Iterates `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    /// Number of columns in the row.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the row has no columns.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
