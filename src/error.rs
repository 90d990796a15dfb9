//! Error type for the report pipeline.
//!
//! [`ReportError`] maps Polars and I/O errors to the failure classes the
//! pipeline distinguishes: load failures, schema mismatches, and internal
//! compute errors.

use polars::error::PolarsError;
use std::fmt;
use std::io;

/// Unified error type for report operations.
#[derive(Debug)]
pub enum ReportError {
    /// A source file is missing, unreadable, or malformed.
    Load(String),
    /// An expected column is absent (schema mismatch).
    MissingColumn(String),
    /// Internal / compute error.
    Compute(String),
    /// I/O error outside of source loading.
    Io(String),
    /// Operation attempted on a released session.
    Session(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Load(s) => write!(f, "load error: {s}"),
            ReportError::MissingColumn(s) => write!(f, "missing column: {s}"),
            ReportError::Compute(s) => write!(f, "compute error: {s}"),
            ReportError::Io(s) => write!(f, "io error: {s}"),
            ReportError::Session(s) => write!(f, "session error: {s}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<PolarsError> for ReportError {
    fn from(e: PolarsError) -> Self {
        let msg = e.to_string();
        match &e {
            PolarsError::ColumnNotFound(_) | PolarsError::SchemaFieldNotFound(_) => {
                ReportError::MissingColumn(msg)
            }
            PolarsError::IO { .. } => ReportError::Load(msg),
            _ => ReportError::Compute(msg),
        }
    }
}

impl From<io::Error> for ReportError {
    fn from(e: io::Error) -> Self {
        ReportError::Io(e.to_string())
    }
}
