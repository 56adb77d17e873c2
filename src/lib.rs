//! Relational table access toolkit over SQLite.
//!
//! # Intention
//!
//! - Describe a table once ([`TableSchema`]: name, error prefix, ordered
//!   columns) and generate parameterized insert/update/select/delete text
//!   from it.
//! - Execute statements through an opaque [`Executor`] and walk result rows
//!   with a [`Cursor`].
//! - Report every data-access operation through a uniform [`Response`]
//!   carrying a stable error code.
//!
//! # Architectural Boundaries
//!
//! - Only statement generation, execution plumbing, and row cursors belong
//!   here.
//! - Connection management, pooling, retries, and transactions stay with the
//!   caller; the executor is treated as an opaque collaborator.
//!
//! # Example
//!
//! ```no_run
//! use tablekit::{SqliteExecutor, TableSchema, values};
//!
//! # fn main() -> anyhow::Result<()> {
//! let db = SqliteExecutor::open_in_memory()?;
//! let users = TableSchema::new("users", "USERS", ["uuid", "name", "age"])?;
//!
//! let resp = users.execute(&db, "IN", &users.insert_statement(), &values!["u-1", "Ada", 36]);
//! assert!(resp.success());
//!
//! let (resp, cursor) = users.select(&db, &users.select_statement_by_uuid(), &values!["u-1"]);
//! assert!(resp.success());
//! let (resp, name) = cursor.unwrap().fetch_once(|row| row.get::<String>(1));
//! assert!(resp.success());
//! assert_eq!(name.as_deref(), Some("Ada"));
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cursor;
pub mod error;
pub mod executor;
pub mod response;
pub mod sqlite;
pub mod table;
pub mod value;

pub use cursor::Cursor;
pub use error::{ConfigError, ScanError};
pub use executor::{Executor, RowStream};
pub use response::{Response, NO_MORE_RECORDS};
pub use sqlite::SqliteExecutor;
pub use table::TableSchema;
pub use value::{FromValue, Row, Value};
