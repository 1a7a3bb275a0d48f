//! # sqlchain-mysql
//!
//! MySQL implementation of the `sqlchain-core` `Driver` contract,
//! built on sqlx. Binds the builder's tagged parameter values onto
//! prepared statements and maps every result cell back to nullable
//! text, which is what the loosely typed read terminals expect.
//!
//! ```no_run
//! use sqlchain_core::{params, Dao};
//! use sqlchain_mysql::{ConnectConfig, MySqlDriver};
//!
//! # async fn demo() -> sqlchain_core::Result<()> {
//! let driver = MySqlDriver::connect(&ConnectConfig {
//!     password: Some(String::from("123456")),
//!     database: String::from("test1"),
//!     collation: Some(String::from("utf8mb4_general_ci")),
//!     ..ConnectConfig::default()
//! })
//! .await?;
//!
//! let mut dao = Dao::new(driver);
//! let names = dao
//!     .table("author")
//!     .fields(["name"])
//!     .where_clause("id > ?", params![1])
//!     .column()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod driver;

pub use config::ConnectConfig;
pub use driver::MySqlDriver;
