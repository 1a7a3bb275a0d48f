//! # sqlchain-core
//!
//! A fluent SQL statement builder. Clauses accumulate through chained
//! calls on a [`Dao`]; a terminal call renders one parameterized
//! statement, runs it through a [`Driver`], and clears the builder for
//! the next statement.
//!
//! ```no_run
//! # use sqlchain_core::{params, values, Dao, Driver};
//! # async fn demo<D: Driver>(mut dao: Dao<D>) -> sqlchain_core::Result<()> {
//! let id = dao
//!     .table("author")
//!     .insert(values! { "id" => 3, "name" => "wangjunhao" })
//!     .await?;
//!
//! let rows = dao
//!     .table("author a")
//!     .fields(["a.id", "a.name n"])
//!     .where_clause("a.id > ?", params![1])
//!     .order_by(["a.id DESC"])
//!     .limit(10)
//!     .rows()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Identifier tokens (table and column names passed as separate
//! arguments) are backtick-quoted; predicate strings are trusted
//! opaque text. Results are loosely typed: every value comes back as
//! text and SQL NULL is an empty string.

pub mod dao;
pub mod driver;
pub mod error;
pub mod ident;
pub mod row;
pub mod statement;
pub mod value;

pub use dao::Dao;
pub use driver::{Driver, ExecOutcome, QueryOutcome};
pub use error::{DaoError, Result};
pub use ident::{raw, FieldExpr};
pub use row::TextRow;
pub use statement::Statement;
pub use value::{SqlValue, ToSqlValue};
