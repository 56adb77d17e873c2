//! Cursor over an open row stream.

use tracing::{debug, error};

use crate::error::ScanError;
use crate::executor::RowStream;
use crate::response::{format_error_code, Response};
use crate::value::Row;

/// Stateful handle over the row stream of one successful select.
///
/// A cursor is OPEN while it holds the stream and CLOSED once the stream has
/// been released — on exhaustion, on a scan error, on [`close`](Cursor::close),
/// or when the cursor is dropped. A failed select never constructs a cursor
/// in the first place. Whatever path leaves the OPEN state, the stream is
/// released exactly once; ownership makes a double release inexpressible.
///
/// Cursors are independent of the [`TableSchema`](crate::TableSchema) that
/// opened them: holding several cursors from the same schema is fine.
pub struct Cursor<'db> {
    stream: Option<Box<dyn RowStream + 'db>>,
    error_prefix: String,
}

impl<'db> Cursor<'db> {
    pub(crate) fn open(stream: Box<dyn RowStream + 'db>, error_prefix: String) -> Self {
        Self {
            stream: Some(stream),
            error_prefix,
        }
    }

    /// Whether the underlying row stream is still held.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Releases the row stream without fetching further.
    pub fn close(&mut self) {
        self.stream = None;
    }

    /// Advances to the next row and scans it through `scan`.
    ///
    /// Outcomes:
    /// - a pending row scans cleanly: success, with the scanned value;
    /// - the scan fails: the stream is released and the response carries
    ///   `TI:<prefix>_QU_FN_00`;
    /// - no rows remain: the stream is released and the distinct
    ///   [`no_more_records`](Response::no_more_records) response is returned
    ///   — termination, not a fault.
    ///
    /// On a CLOSED cursor this fails fast with the exhaustion response; it
    /// never reopens the stream.
    pub fn fetch_next<T>(
        &mut self,
        scan: impl FnOnce(&Row) -> Result<T, ScanError>,
    ) -> (Response, Option<T>) {
        debug!("fetch next");
        let Some(stream) = self.stream.as_mut() else {
            return (Response::no_more_records(), None);
        };
        match stream.next_row() {
            Ok(Some(row)) => match scan(&row) {
                Ok(value) => (Response::ok(), Some(value)),
                Err(err) => {
                    self.stream = None;
                    let code = format_error_code(&self.error_prefix, "QU", "FN", "00");
                    (Response::error(code, &err), None)
                }
            },
            Ok(None) => {
                self.stream = None;
                (Response::no_more_records(), None)
            }
            Err(err) => {
                // A stream fault still ends the cursor as plain exhaustion;
                // the fault itself goes to the log under its own code.
                self.stream = None;
                let code = format_error_code(&self.error_prefix, "QU", "FN", "01");
                error!(code = %code, error = %err, "sql error");
                (Response::no_more_records(), None)
            }
        }
    }

    /// Fetches a single row and releases the stream, regardless of how many
    /// rows remain.
    ///
    /// Consuming the cursor is the point: callers that need more than one
    /// row loop on [`fetch_next`](Cursor::fetch_next) instead.
    pub fn fetch_once<T>(
        mut self,
        scan: impl FnOnce(&Row) -> Result<T, ScanError>,
    ) -> (Response, Option<T>) {
        debug!("fetch once");
        self.fetch_next(scan)
        // remaining rows are released when `self` drops here
    }
}
