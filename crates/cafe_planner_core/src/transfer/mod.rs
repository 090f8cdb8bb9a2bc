//! Backup import/export.
//!
//! # Responsibility
//! - Serialize the store into a versioned JSON bundle or a flat CSV table.
//! - Validate an incoming JSON bundle and itemize every problem found.
//!
//! # Invariants
//! - Export followed by import reproduces categories, tasks and notes exactly;
//!   only `exportedAt` differs between two exports of the same store.
//! - Import never touches storage; callers replace data after confirmation.

mod export;
mod import;

pub use export::{export_csv, export_file_name, export_json, ExportFormat, CSV_HEADER};
pub use import::validate_import;

use crate::model::category::Category;
use crate::model::note::Note;
use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Bundle schema version written by this build.
pub const EXPORT_SCHEMA_VERSION: u32 = 1;

/// On-disk JSON backup shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub version: u32,
    /// RFC 3339 timestamp in the reference offset.
    pub exported_at: String,
    pub categories: Vec<Category>,
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
}

/// Export-side serialization failure.
#[derive(Debug)]
pub enum TransferError {
    Json(serde_json::Error),
    Csv(csv::Error),
    Encoding(std::string::FromUtf8Error),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "json export failed: {err}"),
            Self::Csv(err) => write!(f, "csv export failed: {err}"),
            Self::Encoding(err) => write!(f, "export produced invalid utf-8: {err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::Encoding(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for TransferError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<csv::Error> for TransferError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<std::string::FromUtf8Error> for TransferError {
    fn from(value: std::string::FromUtf8Error) -> Self {
        Self::Encoding(value)
    }
}

/// Rejected import with one human-readable line per problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportError {
    pub errors: Vec<String>,
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "import rejected ({} problem(s))", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n- {error}")?;
        }
        Ok(())
    }
}

impl Error for ImportError {}
