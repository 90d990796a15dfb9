//! Session: the scoped table-processing context.
//!
//! A [`Session`] must be acquired before any load or table operation and
//! released exactly once with [`Session::stop`] when the run completes or
//! fails. `stop` is idempotent and `Drop` is the backstop release, so the
//! underlying engine is torn down deterministically on every exit path.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use polars::prelude::{LazyCsvReader, LazyFileListReader, NullValues};
use tracing::debug;

use crate::error::ReportError;
use crate::frame::Frame;

/// Schema inference reads this many rows by default.
const DEFAULT_INFER_SCHEMA_ROWS: usize = 100;

/// Builder for creating a [`Session`] with configuration options.
pub struct SessionBuilder {
    app_name: Option<String>,
    infer_schema_rows: usize,
}

impl SessionBuilder {
    pub fn new() -> Self {
        SessionBuilder {
            app_name: None,
            infer_schema_rows: DEFAULT_INFER_SCHEMA_ROWS,
        }
    }

    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Default schema-inference depth for readers created from this session.
    pub fn infer_schema_rows(mut self, rows: usize) -> Self {
        self.infer_schema_rows = rows;
        self
    }

    pub fn get_or_create(self) -> Session {
        Session {
            app_name: self.app_name,
            infer_schema_rows: self.infer_schema_rows,
            stopped: AtomicBool::new(false),
        }
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry point for loading tables and running the pipeline.
pub struct Session {
    app_name: Option<String>,
    infer_schema_rows: usize,
    stopped: AtomicBool,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    /// True until [`stop`](Self::stop) has been called.
    pub fn is_active(&self) -> bool {
        !self.stopped.load(Ordering::SeqCst)
    }

    /// Release the processing context. Idempotent; loads after this fail.
    pub fn stop(&self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            debug!(app_name = self.app_name.as_deref(), "session stopped");
        }
    }

    /// Get a [`Reader`] with this session's defaults.
    pub fn read(&self) -> Reader<'_> {
        Reader {
            session: self,
            has_header: true,
            delimiter: b',',
            null_token: None,
            infer_schema_rows: self.infer_schema_rows,
        }
    }

    /// Read a CSV source with default options (header row, comma-separated,
    /// column types inferred).
    pub fn read_csv(&self, path: impl AsRef<Path>) -> Result<Frame, ReportError> {
        self.read().load(path)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Reader for delimited-text sources with per-source options.
pub struct Reader<'a> {
    session: &'a Session,
    has_header: bool,
    delimiter: u8,
    null_token: Option<String>,
    infer_schema_rows: usize,
}

impl Reader<'_> {
    /// Whether the first row is a header naming the columns.
    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sentinel string parsed as a missing value in every column.
    pub fn null_token(mut self, token: impl Into<String>) -> Self {
        self.null_token = Some(token.into());
        self
    }

    pub fn infer_schema_rows(mut self, rows: usize) -> Self {
        self.infer_schema_rows = rows;
        self
    }

    /// Load the source at `path` into a [`Frame`]. Any failure here is a
    /// fatal load error; no partial table is produced.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Frame, ReportError> {
        if !self.session.is_active() {
            return Err(ReportError::Session(
                "cannot load a source on a stopped session".into(),
            ));
        }
        let path = path.as_ref();
        let mut reader = LazyCsvReader::new(path)
            .with_has_header(self.has_header)
            .with_infer_schema_length(Some(self.infer_schema_rows))
            .with_separator(self.delimiter);
        if let Some(token) = &self.null_token {
            reader = reader.with_null_values(Some(NullValues::AllColumnsSingle(
                token.clone().into(),
            )));
        }
        let df = reader
            .finish()
            .and_then(|lf| lf.collect())
            .map_err(|e| ReportError::Load(format!("read {}: {e}", path.display())))?;
        debug!(path = %path.display(), rows = df.height(), "loaded csv source");
        Ok(Frame::from_polars(df))
    }
}
