//! Identifier normalization.
//!
//! Bare table and column tokens are turned into backtick-quoted SQL
//! fragments. Quoting is purely textual: a wildcard is left bare, a
//! dotted `qualifier.column` reference quotes both parts independently,
//! and an alias is detected by splitting on whitespace and keeping the
//! first and last segments. Anything richer than that (function calls,
//! arithmetic) must go through [`raw`], which bypasses normalization.

/// A field expression passed to `fields()`.
///
/// Plain strings are normalized (quoted, alias-aware); raw fragments
/// are inserted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldExpr {
    /// A bare identifier token, normalized before rendering.
    Ident(String),
    /// A pre-rendered SQL fragment, inserted as-is.
    Raw(String),
}

impl From<&str> for FieldExpr {
    fn from(token: &str) -> Self {
        Self::Ident(String::from(token))
    }
}

impl From<String> for FieldExpr {
    fn from(token: String) -> Self {
        Self::Ident(token)
    }
}

/// Marks a field expression as raw SQL, bypassing identifier
/// normalization. Intended for aggregates and function calls:
/// `raw("COUNT(*) AS total")`.
pub fn raw(fragment: impl Into<String>) -> FieldExpr {
    FieldExpr::Raw(fragment.into())
}

/// Quotes a column token.
///
/// `*` stays bare, `t.*` quotes only the qualifier, `t.col` quotes both
/// parts, and a bare `col` is quoted alone.
#[must_use]
pub fn column_expr(token: &str) -> String {
    match token.split_once('.') {
        Some((qualifier, "*")) => format!("`{qualifier}`.*"),
        Some((qualifier, column)) => format!("`{qualifier}`.`{column}`"),
        None if token == "*" => String::from("*"),
        None => format!("`{token}`"),
    }
}

/// Quotes a table token, splitting off a trailing alias.
///
/// `"author"` renders `` `author` ``; `"author a"` and `"author as a"`
/// both render `` `author` AS `a` `` (the first and last
/// whitespace-separated segments are kept, anything in between is
/// dropped).
#[must_use]
pub fn table_ref(token: &str) -> String {
    let mut segments = token.split_whitespace();
    let Some(name) = segments.next() else {
        return String::new();
    };
    segments.next_back().map_or_else(
        || format!("`{name}`"),
        |alias| format!("`{name}` AS `{alias}`"),
    )
}

/// Normalizes a field token, detecting an alias.
///
/// `"col alias"` and `"col AS alias"` both render
/// `` `col` AS `alias` ``; a token with no whitespace goes through
/// [`column_expr`]. The alias split takes exactly the first and last
/// whitespace-delimited segments, so a multi-word expression would
/// mis-split; use [`raw`] for those.
#[must_use]
pub fn field_expr(token: &str) -> String {
    let token = token.trim();
    let mut segments = token.split_whitespace();
    let Some(first) = segments.next() else {
        return String::new();
    };
    segments.next_back().map_or_else(
        || column_expr(first),
        |alias| format!("{} AS `{alias}`", column_expr(first)),
    )
}

/// Normalizes an order-by entry: the leading column token is quoted, a
/// trailing direction token (`ASC`/`DESC`) is kept as supplied.
#[must_use]
pub fn order_expr(token: &str) -> String {
    let mut segments = token.split_whitespace();
    let Some(column) = segments.next() else {
        return String::new();
    };
    segments.next().map_or_else(
        || column_expr(column),
        |direction| format!("{} {direction}", column_expr(column)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_expr_wildcard() {
        assert_eq!(column_expr("*"), "*");
        assert_eq!(column_expr("t.*"), "`t`.*");
    }

    #[test]
    fn test_column_expr_plain_and_dotted() {
        assert_eq!(column_expr("name"), "`name`");
        assert_eq!(column_expr("t.col"), "`t`.`col`");
    }

    #[test]
    fn test_table_ref_plain() {
        assert_eq!(table_ref("author"), "`author`");
    }

    #[test]
    fn test_table_ref_alias_forms() {
        assert_eq!(table_ref("author a"), "`author` AS `a`");
        assert_eq!(table_ref("author as a"), "`author` AS `a`");
        assert_eq!(table_ref("author AS a"), "`author` AS `a`");
    }

    #[test]
    fn test_field_expr_alias_forms() {
        // Both forms produce identical output.
        assert_eq!(field_expr("name n"), "`name` AS `n`");
        assert_eq!(field_expr("name AS n"), "`name` AS `n`");
        assert_eq!(field_expr("t.name n"), "`t`.`name` AS `n`");
    }

    #[test]
    fn test_field_expr_single_token() {
        assert_eq!(field_expr("*"), "*");
        assert_eq!(field_expr("t.*"), "`t`.*");
        assert_eq!(field_expr("password"), "`password`");
        assert_eq!(field_expr("  password  "), "`password`");
    }

    #[test]
    fn test_order_expr() {
        assert_eq!(order_expr("salary"), "`salary`");
        assert_eq!(order_expr("salary ASC"), "`salary` ASC");
        assert_eq!(order_expr("t.salary DESC"), "`t`.`salary` DESC");
    }

    #[test]
    fn test_raw_bypasses_normalization() {
        assert_eq!(
            raw("COUNT(*) AS total"),
            FieldExpr::Raw(String::from("COUNT(*) AS total"))
        );
    }
}
