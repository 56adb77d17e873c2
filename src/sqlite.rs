//! rusqlite-backed executor.

use std::collections::VecDeque;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::functions::FunctionFlags;
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, ToSql};

use crate::executor::{Executor, RowStream};
use crate::value::{Row, Value};

/// [`Executor`](crate::Executor) over a [`rusqlite::Connection`].
///
/// The generated statements stamp audit columns with the MySQL-flavored
/// `NOW()`, which SQLite does not provide, so every wrapped connection gets
/// a scalar `NOW()` registered that returns Unix epoch seconds. Statement
/// text therefore runs unchanged on the bundled backend.
pub struct SqliteExecutor {
    conn: Connection,
}

impl SqliteExecutor {
    /// Wraps an already-open connection.
    pub fn new(conn: Connection) -> anyhow::Result<Self> {
        register_now(&conn)?;
        Ok(Self { conn })
    }

    /// Opens (creating if needed) a database file.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Self::new(Connection::open(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    /// The wrapped connection, for setup work outside this crate's scope
    /// (schema creation, pragmas).
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Executor for SqliteExecutor {
    fn execute(&self, sql: &str, args: &[Value]) -> anyhow::Result<u64> {
        let affected = self.conn.execute(sql, params_from_iter(args.iter()))?;
        Ok(affected as u64)
    }

    fn query(&self, sql: &str, args: &[Value]) -> anyhow::Result<Box<dyn RowStream + '_>> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns = stmt.column_count();
        let mut rows = stmt.query(params_from_iter(args.iter()))?;

        // rusqlite row handles borrow their statement, so the result set is
        // drained here rather than streamed out of the call.
        let mut buffered = VecDeque::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns);
            for index in 0..columns {
                values.push(Value::from(row.get_ref(index)?));
            }
            buffered.push_back(Row::new(values));
        }
        Ok(Box::new(BufferedRows { rows: buffered }))
    }
}

struct BufferedRows {
    rows: VecDeque<Row>,
}

impl RowStream for BufferedRows {
    fn next_row(&mut self) -> anyhow::Result<Option<Row>> {
        Ok(self.rows.pop_front())
    }
}

fn register_now(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function("NOW", 0, FunctionFlags::SQLITE_UTF8, |_ctx| {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|err| rusqlite::Error::UserFunctionError(err.into()))?;
        Ok(now.as_secs() as i64)
    })
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Integer(v) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*v)),
            Value::Real(v) => ToSqlOutput::Owned(rusqlite::types::Value::Real(*v)),
            Value::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Value::Blob(v) => ToSqlOutput::Borrowed(ValueRef::Blob(v)),
            // stored the way SQLite stores booleans
            Value::Boolean(v) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*v as i64)),
        })
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Integer(v),
            ValueRef::Real(v) => Value::Real(v),
            // invalid UTF-8 is replaced rather than failing the fetch
            ValueRef::Text(v) => Value::Text(String::from_utf8_lossy(v).into_owned()),
            ValueRef::Blob(v) => Value::Blob(v.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_registered() {
        let db = SqliteExecutor::open_in_memory().unwrap();
        let mut stream = db.query("SELECT NOW()", &[]).unwrap();
        let row = stream.next_row().unwrap().unwrap();
        assert!(row.get::<i64>(0).unwrap() > 0);
    }

    #[test]
    fn arguments_bind_positionally() {
        let db = SqliteExecutor::open_in_memory().unwrap();
        let args = [
            Value::Text("x".to_string()),
            Value::Integer(7),
            Value::Boolean(true),
            Value::Null,
        ];
        let mut stream = db.query("SELECT ?, ?, ?, ?", &args).unwrap();
        let row = stream.next_row().unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "x");
        assert_eq!(row.get::<i64>(1).unwrap(), 7);
        assert_eq!(row.get::<bool>(2).unwrap(), true);
        assert_eq!(row.get::<Option<i64>>(3).unwrap(), None);
    }
}
