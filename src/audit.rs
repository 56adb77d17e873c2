//! Fixed audit-column policy.
//!
//! Every generated insert stamps `created_at` and `updated_at`; every
//! generated update touches `updated_at` only. The pair is not configurable
//! per table.

/// Audit columns appended to every insert, in order.
pub const TIME_AUDIT_COLUMNS: [&str; 2] = ["created_at", "updated_at"];

/// VALUES fragment matching [`TIME_AUDIT_COLUMNS`] on insert.
pub const INSERT_TIME_AUDIT_VALUES: &str = "NOW(), NOW()";

/// SET fragment appended to every update. `created_at` is never touched by
/// an update.
pub const UPDATE_TIME_AUDIT_CLAUSE: &str = ", updated_at = NOW()";
