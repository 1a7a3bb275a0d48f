//! SQL parameter values.
//!
//! Bound values travel through the builder as a loosely typed tagged
//! union so that one parameter list can mix integers, text, blobs and
//! NULLs. Conversion from ordinary Rust types goes through
//! [`ToSqlValue`]; heterogeneous lists are most conveniently built with
//! the [`params!`](crate::params) macro.

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Byte sequence.
    Bytes(Vec<u8>),
}

/// Trait for types that can be bound as a SQL parameter.
pub trait ToSqlValue {
    /// Converts the value into a [`SqlValue`].
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> Self {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

macro_rules! impl_to_sql_value_int {
    ($($t:ty),+) => {
        $(impl ToSqlValue for $t {
            fn to_sql_value(self) -> SqlValue {
                SqlValue::Int(i64::from(self))
            }
        })+
    };
}

impl_to_sql_value_int!(i8, i16, i32, i64, u8, u16, u32);

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bytes(self)
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bytes(self.to_vec())
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        self.map_or(SqlValue::Null, ToSqlValue::to_sql_value)
    }
}

/// Builds a `Vec<SqlValue>` from a heterogeneous list of bindable
/// values.
///
/// ```
/// use sqlchain_core::params;
///
/// let params = params![2, "goodnews", None::<i64>];
/// assert_eq!(params.len(), 3);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        Vec::<$crate::SqlValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::ToSqlValue::to_sql_value($value)),+]
    };
}

/// Builds the `Vec<(String, SqlValue)>` field map taken by the insert
/// and update terminals.
///
/// ```
/// use sqlchain_core::values;
///
/// let fields = values! { "id" => 3, "name" => "wangjunhao" };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! values {
    ($($column:expr => $value:expr),+ $(,)?) => {
        vec![$((
            String::from($column),
            $crate::ToSqlValue::to_sql_value($value),
        )),+]
    };
}
