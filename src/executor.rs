//! The seam to the external connection collaborator.
//!
//! The core depends on exactly two operations: run a statement, and run a
//! query that yields a row stream. Everything behind them — pooling,
//! retries, transactions, timeouts — belongs to the implementation, not to
//! this crate. Errors cross the seam as opaque [`anyhow::Error`] values and
//! are folded into [`Response`](crate::Response) codes by the caller.

use crate::value::{Row, Value};

/// An open connection (or pool handle) statements run against.
pub trait Executor {
    /// Runs a non-query statement, returning the affected row count.
    fn execute(&self, sql: &str, args: &[Value]) -> anyhow::Result<u64>;

    /// Runs a query, returning the stream of result rows.
    fn query(&self, sql: &str, args: &[Value]) -> anyhow::Result<Box<dyn RowStream + '_>>;
}

/// An open row stream produced by [`Executor::query`].
///
/// Dropping the stream releases it; implementations must make drop cheap and
/// infallible.
pub trait RowStream {
    /// The next pending row, or `None` once the stream is exhausted.
    fn next_row(&mut self) -> anyhow::Result<Option<Row>>;
}
