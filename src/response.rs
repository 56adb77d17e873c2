//! Uniform success/error value returned by every data-access operation.

use std::fmt;

use tracing::error;

/// Error code reported when a cursor runs out of rows.
///
/// Exhaustion is a normal termination signal, not a fault; callers that loop
/// on [`Cursor::fetch_next`](crate::Cursor::fetch_next) stop when they see
/// it. Check with [`Response::is_exhausted`].
pub const NO_MORE_RECORDS: &str = "QUFNEOC";

/// Outcome of one data-access operation.
///
/// A `Response` is a terminal value: it is never thrown, never mutated after
/// return, and `success()` is `true` exactly when both error fields are
/// empty. That invariant is enforced by construction, so the fields stay
/// private.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    success: bool,
    error_code: String,
    error_message: String,
}

impl Response {
    /// A successful outcome with empty error fields.
    pub fn ok() -> Self {
        Self {
            success: true,
            error_code: String::new(),
            error_message: String::new(),
        }
    }

    /// A failed outcome carrying `code` and the error's message.
    ///
    /// The failure is also emitted at error level; with no tracing
    /// subscriber installed the event is silently skipped.
    pub fn error(code: impl Into<String>, err: &dyn fmt::Display) -> Self {
        let error_code = code.into();
        let error_message = err.to_string();
        error!(code = %error_code, error = %error_message, "sql error");
        Self {
            success: false,
            error_code,
            error_message,
        }
    }

    /// The distinct "no more records" outcome a cursor returns once its row
    /// stream is exhausted.
    pub fn no_more_records() -> Self {
        Self {
            success: false,
            error_code: NO_MORE_RECORDS.to_string(),
            error_message: "No more records".to_string(),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Whether this is the exhaustion outcome rather than a fault.
    pub fn is_exhausted(&self) -> bool {
        self.error_code == NO_MORE_RECORDS
    }
}

/// Converting a `Response` to text yields its error message.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error_message)
    }
}

impl std::error::Error for Response {}

/// Formats the stable error-code string:
/// `TI:<prefix>_<category>_<step>_<sequence>`, e.g. `TI:USERS_QU_SL_00`.
pub(crate) fn format_error_code(prefix: &str, category: &str, step: &str, seq: &str) -> String {
    format!("TI:{prefix}_{category}_{step}_{seq}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_has_empty_error_fields() {
        let resp = Response::ok();
        assert!(resp.success());
        assert_eq!(resp.error_code(), "");
        assert_eq!(resp.error_message(), "");
        assert!(!resp.is_exhausted());
    }

    #[test]
    fn error_populates_both_fields() {
        let resp = Response::error("TI:USERS_QU_SL_00", &"table is locked");
        assert!(!resp.success());
        assert_eq!(resp.error_code(), "TI:USERS_QU_SL_00");
        assert_eq!(resp.error_message(), "table is locked");
    }

    #[test]
    fn display_yields_error_message() {
        let resp = Response::error("TI:USERS_IN_EX_00", &"no such table: users");
        assert_eq!(resp.to_string(), "no such table: users");
    }

    #[test]
    fn no_more_records_is_exhausted_not_a_fault_code() {
        let resp = Response::no_more_records();
        assert!(!resp.success());
        assert!(resp.is_exhausted());
        assert_eq!(resp.error_code(), NO_MORE_RECORDS);
        assert_eq!(resp.error_message(), "No more records");
    }

    #[test]
    fn error_code_format() {
        assert_eq!(
            format_error_code("USERS", "QU", "SL", "00"),
            "TI:USERS_QU_SL_00"
        );
    }
}
