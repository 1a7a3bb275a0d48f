//! Statement state and rendering.
//!
//! A [`Statement`] accumulates clause fragments through chained calls
//! and renders them into one parameterized SQL string. Rendering is
//! purely textual: identifiers supplied as separate tokens are quoted
//! via [`crate::ident`], while condition, having and join-on strings
//! are trusted opaque text from the caller.

use crate::error::{DaoError, Result};
use crate::ident::{column_expr, field_expr, order_expr, table_ref, FieldExpr};
use crate::value::SqlValue;

/// An opaque predicate with its bound values.
#[derive(Debug, Clone)]
struct Predicate {
    sql: String,
    params: Vec<SqlValue>,
}

/// One rendered join clause with its own parameter list.
#[derive(Debug, Clone)]
struct Join {
    sql: String,
    params: Vec<SqlValue>,
}

/// Accumulated clause state for a single in-flight statement.
///
/// Fluent calls mutate the state and return `&mut Self` so clauses can
/// be chained; `render_*` consumes the state and produces the SQL text
/// plus the ordered parameter list. For a read statement the parameter
/// order is join params (in declaration order), then filter params,
/// then having params, matching the clause order of the rendered SQL.
#[derive(Debug, Clone, Default)]
pub struct Statement {
    table: String,
    fields: Vec<String>,
    distinct: bool,
    filter: Option<Predicate>,
    joins: Vec<Join>,
    group_by: Vec<String>,
    having: Option<Predicate>,
    order_by: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Statement {
    /// Creates an empty statement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the target table. Accepts an optional alias:
    /// `"author"` or `"author a"`.
    pub fn table(&mut self, token: &str) -> &mut Self {
        self.table = table_ref(token);
        self
    }

    /// Marks the query as `SELECT DISTINCT`.
    pub const fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    /// Sets the output columns, replacing any previous field list.
    ///
    /// Tokens are normalized per [`crate::ident::field_expr`]; pass
    /// [`crate::ident::raw`] fragments for expressions that must not be
    /// quoted. Omitting this call selects `*`.
    pub fn fields<I, F>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldExpr>,
    {
        self.fields = fields
            .into_iter()
            .map(|f| match f.into() {
                FieldExpr::Ident(token) => field_expr(&token),
                FieldExpr::Raw(fragment) => fragment,
            })
            .collect();
        self
    }

    /// Sets the filter predicate, replacing any previous one. The
    /// condition is opaque text with `?` placeholders; `params` are the
    /// values bound to them, in order. An empty condition clears any
    /// stored filter.
    pub fn where_clause(&mut self, condition: impl Into<String>, params: Vec<SqlValue>) -> &mut Self {
        let sql = condition.into();
        self.filter = if sql.is_empty() {
            None
        } else {
            Some(Predicate { sql, params })
        };
        self
    }

    /// Appends a join clause. Joins accumulate and render in call
    /// order; the kind is upper-cased.
    pub fn join(
        &mut self,
        kind: &str,
        table: &str,
        on: &str,
        params: Vec<SqlValue>,
    ) -> &mut Self {
        self.joins.push(Join {
            sql: format!("{} JOIN {} ON {on}", kind.to_uppercase(), table_ref(table)),
            params,
        });
        self
    }

    /// Appends a `LEFT JOIN`.
    pub fn left_join(&mut self, table: &str, on: &str, params: Vec<SqlValue>) -> &mut Self {
        self.join("LEFT", table, on, params)
    }

    /// Appends a `RIGHT JOIN`.
    pub fn right_join(&mut self, table: &str, on: &str, params: Vec<SqlValue>) -> &mut Self {
        self.join("RIGHT", table, on, params)
    }

    /// Sets the grouping columns, replacing any previous list.
    pub fn group_by<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.group_by = columns
            .into_iter()
            .map(|c| column_expr(c.as_ref()))
            .collect();
        self
    }

    /// Sets the ordering columns, replacing any previous list. Each
    /// entry may carry a trailing direction token: `"salary DESC"`.
    pub fn order_by<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.order_by = columns
            .into_iter()
            .map(|c| order_expr(c.as_ref()))
            .collect();
        self
    }

    /// Sets the post-aggregation predicate; same contract as
    /// [`Statement::where_clause`].
    pub fn having(&mut self, condition: impl Into<String>, params: Vec<SqlValue>) -> &mut Self {
        let sql = condition.into();
        self.having = if sql.is_empty() {
            None
        } else {
            Some(Predicate { sql, params })
        };
        self
    }

    /// Limits the number of result rows.
    pub const fn limit(&mut self, n: u64) -> &mut Self {
        self.limit = Some(n);
        self
    }

    /// Skips the first `n` result rows. Only rendered when a limit is
    /// also set.
    pub const fn offset(&mut self, n: u64) -> &mut Self {
        self.offset = Some(n);
        self
    }

    fn require_table(&self) -> Result<()> {
        if self.table.is_empty() {
            return Err(DaoError::Configuration(String::from(
                "no table selected; call table() first",
            )));
        }
        Ok(())
    }

    /// Renders a SELECT statement and its ordered parameter list.
    ///
    /// Clause order is fixed: `SELECT [DISTINCT] fields FROM table
    /// [joins] [WHERE] [GROUP BY] [HAVING] [ORDER BY] [LIMIT [OFFSET]]`,
    /// each emitted only when non-empty. An offset without a limit is
    /// not rendered.
    ///
    /// # Errors
    ///
    /// Returns [`DaoError::Configuration`] when no table was selected.
    pub fn render_select(self) -> Result<(String, Vec<SqlValue>)> {
        self.require_table()?;

        let mut sql = String::from("SELECT ");
        let mut params = Vec::new();

        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        if self.fields.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.fields.join(", "));
        }
        sql.push_str(" FROM ");
        sql.push_str(&self.table);

        for join in self.joins {
            sql.push(' ');
            sql.push_str(&join.sql);
            params.extend(join.params);
        }
        if let Some(filter) = self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter.sql);
            params.extend(filter.params);
        }
        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }
        if let Some(having) = self.having {
            sql.push_str(" HAVING ");
            sql.push_str(&having.sql);
            params.extend(having.params);
        }
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
            if let Some(offset) = self.offset {
                sql.push_str(&format!(" OFFSET {offset}"));
            }
        }

        Ok((sql, params))
    }

    /// Renders an INSERT statement, one placeholder per field, with the
    /// values in field order.
    ///
    /// # Errors
    ///
    /// Returns [`DaoError::Configuration`] when no table was selected
    /// or `assignments` is empty.
    pub fn render_insert(
        self,
        assignments: Vec<(String, SqlValue)>,
    ) -> Result<(String, Vec<SqlValue>)> {
        self.require_table()?;
        if assignments.is_empty() {
            return Err(DaoError::Configuration(String::from(
                "no field values supplied for insert",
            )));
        }

        let columns: Vec<String> = assignments.iter().map(|(col, _)| format!("`{col}`")).collect();
        let placeholders: Vec<&str> = assignments.iter().map(|_| "?").collect();
        let sql = format!(
            "INSERT INTO {} ({}) values ({})",
            self.table,
            columns.join(", "),
            placeholders.join(", "),
        );
        let params = assignments.into_iter().map(|(_, value)| value).collect();
        Ok((sql, params))
    }

    /// Renders an UPDATE statement. Parameter order is the assignment
    /// values first, then the filter params. Without a filter the
    /// statement updates every row; the builder does not guard against
    /// that.
    ///
    /// # Errors
    ///
    /// Returns [`DaoError::Configuration`] when no table was selected
    /// or `assignments` is empty.
    pub fn render_update(
        self,
        assignments: Vec<(String, SqlValue)>,
    ) -> Result<(String, Vec<SqlValue>)> {
        self.require_table()?;
        if assignments.is_empty() {
            return Err(DaoError::Configuration(String::from(
                "no field values supplied for update",
            )));
        }

        let sets: Vec<String> = assignments.iter().map(|(col, _)| format!("`{col}`=?")).collect();
        let mut sql = format!("UPDATE {} SET {}", self.table, sets.join(", "));
        let mut params: Vec<SqlValue> =
            assignments.into_iter().map(|(_, value)| value).collect();
        if let Some(filter) = self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter.sql);
            params.extend(filter.params);
        }
        Ok((sql, params))
    }

    /// Renders a DELETE statement. Without a filter the statement
    /// deletes every row; callers wanting that must mean it.
    ///
    /// # Errors
    ///
    /// Returns [`DaoError::Configuration`] when no table was selected.
    pub fn render_delete(self) -> Result<(String, Vec<SqlValue>)> {
        self.require_table()?;

        let mut sql = format!("DELETE FROM {}", self.table);
        let mut params = Vec::new();
        if let Some(filter) = self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter.sql);
            params.extend(filter.params);
        }
        Ok((sql, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::raw;
    use crate::params;

    #[test]
    fn test_select_defaults_to_wildcard() {
        let mut stmt = Statement::new();
        stmt.table("author");
        let (sql, params) = stmt.render_select().unwrap();
        assert_eq!(sql, "SELECT * FROM `author`");
        assert!(params.is_empty());
    }

    #[test]
    fn test_select_without_table_fails() {
        let err = Statement::new().render_select().unwrap_err();
        assert!(matches!(err, DaoError::Configuration(_)));
    }

    #[test]
    fn test_table_alias() {
        let mut stmt = Statement::new();
        stmt.table("author a");
        let (sql, _) = stmt.render_select().unwrap();
        assert_eq!(sql, "SELECT * FROM `author` AS `a`");
    }

    #[test]
    fn test_field_normalization_forms() {
        let mut stmt = Statement::new();
        stmt.table("t")
            .fields(["*", "t.*", "t.col", "col alias", "col AS alias"]);
        let (sql, _) = stmt.render_select().unwrap();
        assert_eq!(
            sql,
            "SELECT *, `t`.*, `t`.`col`, `col` AS `alias`, `col` AS `alias` FROM `t`"
        );
    }

    #[test]
    fn test_fields_overwrite_previous_list() {
        let mut stmt = Statement::new();
        stmt.table("t").fields(["a", "b"]).fields(["c"]);
        let (sql, _) = stmt.render_select().unwrap();
        assert_eq!(sql, "SELECT `c` FROM `t`");
    }

    #[test]
    fn test_raw_field_is_verbatim() {
        let mut stmt = Statement::new();
        stmt.table("t")
            .fields([FieldExpr::from("id"), raw("COUNT(*) AS total")]);
        let (sql, _) = stmt.render_select().unwrap();
        assert_eq!(sql, "SELECT `id`, COUNT(*) AS total FROM `t`");
    }

    #[test]
    fn test_select_distinct() {
        let mut stmt = Statement::new();
        stmt.table("t").fields(["name"]).distinct();
        let (sql, _) = stmt.render_select().unwrap();
        assert_eq!(sql, "SELECT DISTINCT `name` FROM `t`");
    }

    #[test]
    fn test_where_renders_verbatim() {
        let mut stmt = Statement::new();
        stmt.table("author").where_clause("id=? AND name<>?", params![2, "x"]);
        let (sql, params) = stmt.render_select().unwrap();
        assert_eq!(sql, "SELECT * FROM `author` WHERE id=? AND name<>?");
        assert_eq!(params, params![2, "x"]);
    }

    #[test]
    fn test_empty_where_renders_no_clause() {
        let mut stmt = Statement::new();
        stmt.table("author").where_clause("", vec![]);
        let (sql, _) = stmt.render_select().unwrap();
        assert_eq!(sql, "SELECT * FROM `author`");
    }

    #[test]
    fn test_empty_where_clears_prior_filter() {
        let mut stmt = Statement::new();
        stmt.table("author")
            .where_clause("id=?", params![2])
            .where_clause("", vec![]);
        let (sql, params) = stmt.render_select().unwrap();
        assert_eq!(sql, "SELECT * FROM `author`");
        assert!(params.is_empty());
    }

    #[test]
    fn test_empty_having_clears_prior_predicate() {
        let mut stmt = Statement::new();
        stmt.table("author")
            .group_by(["age"])
            .having("age > ?", params![30])
            .having("", vec![]);
        let (sql, params) = stmt.render_select().unwrap();
        assert_eq!(sql, "SELECT * FROM `author` GROUP BY `age`");
        assert!(params.is_empty());
    }

    #[test]
    fn test_joins_accumulate_in_call_order() {
        let mut stmt = Statement::new();
        stmt.table("t1")
            .left_join("t2 as b", "t1.id = b.id", vec![])
            .join("inner", "t3", "t1.id = t3.id", vec![]);
        let (sql, _) = stmt.render_select().unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM `t1` LEFT JOIN `t2` AS `b` ON t1.id = b.id \
             INNER JOIN `t3` ON t1.id = t3.id"
        );
    }

    #[test]
    fn test_parameter_order_joins_filter_having() {
        let mut stmt = Statement::new();
        stmt.table("t1")
            .having("cnt > ?", params![3])
            .where_clause("t1.x > ?", params![2])
            .left_join("t2", "t1.id = t2.id AND t2.k = ?", params![1])
            .group_by(["t1.x"]);
        let (sql, params) = stmt.render_select().unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM `t1` LEFT JOIN `t2` ON t1.id = t2.id AND t2.k = ? \
             WHERE t1.x > ? GROUP BY `t1`.`x` HAVING cnt > ?"
        );
        // Rendered order matches clause order regardless of call order.
        assert_eq!(params, params![1, 2, 3]);
    }

    #[test]
    fn test_group_having_order() {
        let mut stmt = Statement::new();
        stmt.table("author")
            .group_by(["age"])
            .having("age > ?", params![30])
            .order_by(["salary ASC", "name"]);
        let (sql, params) = stmt.render_select().unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM `author` GROUP BY `age` HAVING age > ? \
             ORDER BY `salary` ASC, `name`"
        );
        assert_eq!(params, params![30]);
    }

    #[test]
    fn test_limit_offset_interaction() {
        let mut stmt = Statement::new();
        stmt.table("t").limit(10);
        let (sql, _) = stmt.render_select().unwrap();
        assert_eq!(sql, "SELECT * FROM `t` LIMIT 10");

        let mut stmt = Statement::new();
        stmt.table("t").limit(10).offset(5);
        let (sql, _) = stmt.render_select().unwrap();
        assert_eq!(sql, "SELECT * FROM `t` LIMIT 10 OFFSET 5");

        // Offset alone renders nothing.
        let mut stmt = Statement::new();
        stmt.table("t").offset(5);
        let (sql, _) = stmt.render_select().unwrap();
        assert_eq!(sql, "SELECT * FROM `t`");
    }

    #[test]
    fn test_render_insert() {
        let mut stmt = Statement::new();
        stmt.table("author");
        let (sql, params) = stmt
            .render_insert(vec![
                (String::from("id"), SqlValue::Int(3)),
                (String::from("name"), SqlValue::Text(String::from("wangjunhao"))),
                (String::from("password"), SqlValue::Text(String::from("chocolate"))),
            ])
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO `author` (`id`, `name`, `password`) values (?, ?, ?)"
        );
        assert_eq!(params, params![3, "wangjunhao", "chocolate"]);
    }

    #[test]
    fn test_render_insert_without_values_fails() {
        let mut stmt = Statement::new();
        stmt.table("author");
        let err = stmt.render_insert(vec![]).unwrap_err();
        assert!(matches!(err, DaoError::Configuration(_)));
    }

    #[test]
    fn test_render_update_params_follow_assignments() {
        let mut stmt = Statement::new();
        stmt.table("author").where_clause("id=?", params![2]);
        let (sql, params) = stmt
            .render_update(vec![(
                String::from("name"),
                SqlValue::Text(String::from("goodnews")),
            )])
            .unwrap();
        assert_eq!(sql, "UPDATE `author` SET `name`=? WHERE id=?");
        assert_eq!(params, params!["goodnews", 2]);
    }

    #[test]
    fn test_render_delete_with_filter() {
        let mut stmt = Statement::new();
        stmt.table("author").where_clause("id=?", params![2]);
        let (sql, params) = stmt.render_delete().unwrap();
        assert_eq!(sql, "DELETE FROM `author` WHERE id=?");
        assert_eq!(params, params![2]);
    }

    #[test]
    fn test_render_delete_without_filter_deletes_all() {
        // Deliberate trust boundary: an unfiltered delete is rendered
        // as-is rather than blocked.
        let mut stmt = Statement::new();
        stmt.table("author");
        let (sql, params) = stmt.render_delete().unwrap();
        assert_eq!(sql, "DELETE FROM `author`");
        assert!(params.is_empty());
    }

    #[test]
    fn test_join_kind_is_uppercased() {
        let mut stmt = Statement::new();
        stmt.table("t1").join("left", "t2", "t1.id = t2.id", vec![]);
        let (sql, _) = stmt.render_select().unwrap();
        assert!(sql.contains("LEFT JOIN `t2`"));
    }
}
