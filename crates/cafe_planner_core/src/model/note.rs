//! Quick note model. Notes are created and deleted, never edited.

use crate::model::theme::Theme;
use crate::model::{check_timestamp, ModelValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type NoteId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    /// Epoch milliseconds.
    pub created_at: i64,
    pub theme: Theme,
}

impl Note {
    /// Creates a note; surrounding whitespace is trimmed, inner line breaks
    /// are kept.
    pub fn new(content: &str, theme: Theme, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.trim().to_string(),
            created_at,
            theme,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.content.trim().is_empty() {
            return Err(ModelValidationError::BlankField("content"));
        }
        check_timestamp("createdAt", self.created_at)
    }
}
