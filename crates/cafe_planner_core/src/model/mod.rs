//! Planner domain model.
//!
//! # Responsibility
//! - Define the three persisted collections: categories, tasks, notes.
//! - Own field-level validation shared by repositories and import.
//!
//! # Invariants
//! - Every record is identified by a UUID that is unique per collection.
//! - Timestamps are Unix epoch milliseconds.
//! - `Task.category_id` may dangle; orphans render as "Special Order".

pub mod category;
pub mod note;
pub mod task;
pub mod theme;

use crate::time::is_representable;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Field-level validation failure for any planner record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// A required text field is empty after trimming.
    BlankField(&'static str),
    /// `completed` task without a completion timestamp.
    MissingCompletedAt,
    /// `active` task still carrying a completion timestamp.
    UnexpectedCompletedAt,
    /// Epoch-ms value with no calendar date-time.
    TimestampOutOfRange(&'static str),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::MissingCompletedAt => {
                write!(f, "completed task must carry completedAt")
            }
            Self::UnexpectedCompletedAt => {
                write!(f, "active task must not carry completedAt")
            }
            Self::TimestampOutOfRange(field) => {
                write!(f, "{field} is outside the supported date range")
            }
        }
    }
}

impl Error for ModelValidationError {}

/// Rejects epoch-ms values that cannot be shown as a date.
pub(crate) fn check_timestamp(field: &'static str, epoch_ms: i64) -> Result<(), ModelValidationError> {
    if is_representable(epoch_ms) {
        Ok(())
    } else {
        Err(ModelValidationError::TimestampOutOfRange(field))
    }
}

/// Trims and collapses inner whitespace runs to a single space.
pub fn normalize_text(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").into_owned()
}
