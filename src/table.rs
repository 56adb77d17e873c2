//! Table descriptors and statement generation.
//!
//! A [`TableSchema`] is a plain, immutable description of one table: its
//! name, the error-code prefix its operations report under, and the ordered
//! column list. The column order is the positional binding contract — the
//! generated placeholder lists match it one to one, and nothing downstream
//! may reorder it.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audit::{INSERT_TIME_AUDIT_VALUES, TIME_AUDIT_COLUMNS, UPDATE_TIME_AUDIT_CLAUSE};
use crate::cursor::Cursor;
use crate::error::ConfigError;
use crate::executor::Executor;
use crate::response::{format_error_code, Response};
use crate::value::Value;

/// Validated description of one table.
///
/// Create it once per logical table and treat it as a value: statement
/// generation is pure, and [`select`](TableSchema::select) hands back an
/// independent [`Cursor`], so one schema can back any number of concurrent
/// row sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub error_prefix: String,
    pub columns: Vec<String>,
}

impl TableSchema {
    /// Builds and validates a schema in one step.
    pub fn new(
        name: impl Into<String>,
        error_prefix: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ConfigError> {
        let schema = Self {
            name: name.into(),
            error_prefix: error_prefix.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Checks the structural preconditions every operation relies on.
    ///
    /// Does not verify that the table exists in the backing store; that
    /// check is deliberately left to the first statement that runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::MissingTableName);
        }
        if self.error_prefix.is_empty() {
            return Err(ConfigError::MissingErrorPrefix);
        }
        if self.columns.is_empty() {
            return Err(ConfigError::MissingColumns);
        }
        for (index, column) in self.columns.iter().enumerate() {
            if column.is_empty() {
                return Err(ConfigError::InvalidColumnName(index));
            }
        }
        Ok(())
    }

    /// Formats the stable error code this table reports under:
    /// `TI:<prefix>_<category>_<step>_<sequence>`.
    pub fn error_code(&self, category: &str, step: &str, seq: &str) -> String {
        format_error_code(&self.error_prefix, category, step, seq)
    }

    /// `INSERT INTO <name> (<cols>, created_at, updated_at)
    /// VALUES (<? per col>, NOW(), NOW())`
    ///
    /// Placeholders bind positionally to the schema's column order; audit
    /// columns are appended last and stamped by the database.
    pub fn insert_statement(&self) -> String {
        let columns: Vec<&str> = self
            .columns
            .iter()
            .map(String::as_str)
            .chain(TIME_AUDIT_COLUMNS)
            .collect();
        let placeholders = vec!["?"; self.columns.len()];
        format!(
            "INSERT INTO {} ({}) VALUES ({}, {})",
            self.name,
            columns.join(", "),
            placeholders.join(", "),
            INSERT_TIME_AUDIT_VALUES,
        )
    }

    /// `UPDATE <name> SET <col> = ?, ..., updated_at = NOW()`
    ///
    /// No WHERE clause is generated; callers append their own. `created_at`
    /// is never touched by an update.
    pub fn update_statement(&self) -> String {
        let assignments: Vec<String> = self.columns.iter().map(|c| format!("{c} = ?")).collect();
        format!(
            "UPDATE {} SET {}{}",
            self.name,
            assignments.join(", "),
            UPDATE_TIME_AUDIT_CLAUSE,
        )
    }

    /// `SELECT <cols> FROM <name> WHERE uuid = ?` — every table is assumed
    /// to carry a `uuid` primary key.
    pub fn select_statement_by_uuid(&self) -> String {
        format!(
            "SELECT {} FROM {} WHERE uuid = ?",
            self.columns.join(", "),
            self.name,
        )
    }

    /// `SELECT <cols> FROM <name> WHERE <trusted_clause>`
    ///
    /// `trusted_clause` is inserted verbatim, with no validation or
    /// escaping: it must come from trusted code, never from user input.
    /// Placeholders inside it still bind to the args of the eventual select.
    pub fn select_statement_by_clause(&self, trusted_clause: &str) -> String {
        format!(
            "SELECT {} FROM {} WHERE {}",
            self.columns.join(", "),
            self.name,
            trusted_clause,
        )
    }

    /// `DELETE FROM <name> WHERE uuid = ?`
    pub fn delete_statement_by_uuid(&self) -> String {
        format!("DELETE FROM {} WHERE uuid = ?", self.name)
    }

    /// `DELETE FROM <name> WHERE <trusted_clause>` — same trust boundary as
    /// [`select_statement_by_clause`](TableSchema::select_statement_by_clause).
    pub fn delete_statement_by_clause(&self, trusted_clause: &str) -> String {
        format!("DELETE FROM {} WHERE {}", self.name, trusted_clause)
    }

    /// Runs a non-query statement through `db`.
    ///
    /// `stmt_type` is a short caller-chosen tag (`"IN"`, `"UP"`, `"DE"`, …)
    /// that becomes the category of the failure code
    /// `TI:<prefix>_<stmt_type>_EX_00`.
    pub fn execute(&self, db: &dyn Executor, stmt_type: &str, sql: &str, args: &[Value]) -> Response {
        info!(statement = %sql, "executing statement");
        match db.execute(sql, args) {
            Ok(_) => Response::ok(),
            Err(err) => Response::error(self.error_code(stmt_type, "EX", "00"), &err),
        }
    }

    /// Runs a select through `db`, returning an open [`Cursor`] on success.
    ///
    /// On failure the response carries `TI:<prefix>_QU_SL_00` and no cursor
    /// exists.
    pub fn select<'db>(
        &self,
        db: &'db dyn Executor,
        sql: &str,
        args: &[Value],
    ) -> (Response, Option<Cursor<'db>>) {
        info!(statement = %sql, args = ?args, "running select");
        match db.query(sql, args) {
            Ok(stream) => (
                Response::ok(),
                Some(Cursor::open(stream, self.error_prefix.clone())),
            ),
            Err(err) => (Response::error(self.error_code("QU", "SL", "00"), &err), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> TableSchema {
        TableSchema::new("t", "USERS", ["a", "b"]).unwrap()
    }

    #[test]
    fn insert_statement_appends_audit_columns_last() {
        assert_eq!(
            users().insert_statement(),
            "INSERT INTO t (a, b, created_at, updated_at) VALUES (?, ?, NOW(), NOW())"
        );
    }

    #[test]
    fn update_statement_never_touches_created_at() {
        let stmt = users().update_statement();
        assert_eq!(stmt, "UPDATE t SET a = ?, b = ?, updated_at = NOW()");
        assert!(!stmt.contains("created_at"));
    }

    #[test]
    fn select_statement_by_uuid_projects_columns_in_order() {
        assert_eq!(
            users().select_statement_by_uuid(),
            "SELECT a, b FROM t WHERE uuid = ?"
        );
    }

    #[test]
    fn clause_is_inserted_verbatim() {
        assert_eq!(
            users().select_statement_by_clause("b >= ? ORDER BY a"),
            "SELECT a, b FROM t WHERE b >= ? ORDER BY a"
        );
        assert_eq!(
            users().delete_statement_by_clause("b < 10"),
            "DELETE FROM t WHERE b < 10"
        );
    }

    #[test]
    fn delete_statement_by_uuid_has_no_projection() {
        assert_eq!(users().delete_statement_by_uuid(), "DELETE FROM t WHERE uuid = ?");
    }

    #[test]
    fn single_column_has_no_separator() {
        let schema = TableSchema::new("t", "T", ["only"]).unwrap();
        assert_eq!(
            schema.insert_statement(),
            "INSERT INTO t (only, created_at, updated_at) VALUES (?, NOW(), NOW())"
        );
        assert_eq!(schema.update_statement(), "UPDATE t SET only = ?, updated_at = NOW()");
    }

    #[test]
    fn validate_reports_the_exact_violation() {
        let mut schema = users();
        schema.name.clear();
        assert_eq!(schema.validate(), Err(ConfigError::MissingTableName));

        let mut schema = users();
        schema.error_prefix.clear();
        assert_eq!(schema.validate(), Err(ConfigError::MissingErrorPrefix));

        let mut schema = users();
        schema.columns.clear();
        assert_eq!(schema.validate(), Err(ConfigError::MissingColumns));

        let mut schema = users();
        schema.columns[1].clear();
        assert_eq!(schema.validate(), Err(ConfigError::InvalidColumnName(1)));
    }

    #[test]
    fn validate_is_idempotent() {
        let schema = users();
        assert_eq!(schema.validate(), Ok(()));
        assert_eq!(schema.validate(), Ok(()));
    }

    #[test]
    fn new_rejects_invalid_descriptors() {
        assert_eq!(
            TableSchema::new("", "USERS", ["a"]).unwrap_err(),
            ConfigError::MissingTableName
        );
        assert_eq!(
            TableSchema::new("t", "USERS", Vec::<String>::new()).unwrap_err(),
            ConfigError::MissingColumns
        );
    }

    #[test]
    fn error_code_uses_the_table_prefix() {
        assert_eq!(users().error_code("QU", "SL", "00"), "TI:USERS_QU_SL_00");
        assert_eq!(users().error_code("IN", "EX", "00"), "TI:USERS_IN_EX_00");
    }
}
