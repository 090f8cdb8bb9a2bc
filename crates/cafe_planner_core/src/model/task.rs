//! Task model.
//!
//! # Responsibility
//! - Define the order ticket shown on the board.
//! - Own status lifecycle helpers (`toggle`, `complete`, `reopen`).
//!
//! # Invariants
//! - `time_block` is always one of the three fixed lanes.
//! - `completed_at` is `Some` iff `status == Completed`.

use crate::model::category::CategoryId;
use crate::model::{check_timestamp, normalize_text, ModelValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TaskId = Uuid;

/// Day segment a task is scheduled into; one board lane each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBlock {
    Morning,
    Afternoon,
    Evening,
}

impl TimeBlock {
    /// Lanes in board order.
    pub const ALL: [TimeBlock; 3] = [TimeBlock::Morning, TimeBlock::Afternoon, TimeBlock::Evening];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "morning" => Some(Self::Morning),
            "afternoon" => Some(Self::Afternoon),
            "evening" => Some(Self::Evening),
            _ => None,
        }
    }

    /// Human-readable lane title.
    pub fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }
}

/// One order ticket on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub category_id: CategoryId,
    pub time_block: TimeBlock,
    pub status: TaskStatus,
    /// Epoch milliseconds. Present only while completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Creates an active task. Title whitespace is normalized.
    pub fn new(
        title: &str,
        category_id: CategoryId,
        time_block: TimeBlock,
        created_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: normalize_text(title),
            category_id,
            time_block,
            status: TaskStatus::Active,
            completed_at: None,
            created_at,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Flips status, stamping `completed_at` with `now_ms` on completion and
    /// clearing it on reopen.
    pub fn toggle(&mut self, now_ms: i64) {
        match self.status {
            TaskStatus::Active => self.complete(now_ms),
            TaskStatus::Completed => self.reopen(),
        }
    }

    pub fn complete(&mut self, now_ms: i64) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(now_ms);
    }

    pub fn reopen(&mut self) {
        self.status = TaskStatus::Active;
        self.completed_at = None;
    }

    /// Applies an edit. Only title, category and lane are mutable.
    pub fn apply_edit(&mut self, edit: &TaskEdit) {
        if let Some(title) = edit.title.as_deref() {
            self.title = normalize_text(title);
        }
        if let Some(category_id) = edit.category_id {
            self.category_id = category_id;
        }
        if let Some(time_block) = edit.time_block {
            self.time_block = time_block;
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.title.trim().is_empty() {
            return Err(ModelValidationError::BlankField("title"));
        }
        check_timestamp("createdAt", self.created_at)?;
        if let Some(completed_at) = self.completed_at {
            check_timestamp("completedAt", completed_at)?;
        }
        match (self.status, self.completed_at) {
            (TaskStatus::Completed, None) => Err(ModelValidationError::MissingCompletedAt),
            (TaskStatus::Active, Some(_)) => Err(ModelValidationError::UnexpectedCompletedAt),
            _ => Ok(()),
        }
    }
}

/// Partial update for the edit dialog; `None` fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub category_id: Option<CategoryId>,
    pub time_block: Option<TimeBlock>,
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskEdit, TaskStatus, TimeBlock};
    use crate::model::ModelValidationError;
    use uuid::Uuid;

    fn sample() -> Task {
        Task::new("  pull   espresso ", Uuid::new_v4(), TimeBlock::Morning, 1_000)
    }

    #[test]
    fn new_task_is_active_with_normalized_title() {
        let task = sample();
        assert_eq!(task.status, TaskStatus::Active);
        assert_eq!(task.completed_at, None);
        assert_eq!(task.title, "pull espresso");
    }

    #[test]
    fn toggle_twice_restores_status_and_clears_completed_at() {
        let mut task = sample();
        let original = task.clone();

        task.toggle(5_000);
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.completed_at, Some(5_000));

        task.toggle(6_000);
        assert_eq!(task, original);
    }

    #[test]
    fn toggle_from_completed_round_trips_to_completed_with_new_stamp() {
        let mut task = sample();
        task.complete(2_000);
        task.toggle(3_000);
        task.toggle(4_000);
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.completed_at, Some(4_000));
    }

    #[test]
    fn edit_touches_only_editable_fields() {
        let mut task = sample();
        task.complete(9_000);
        let category = Uuid::new_v4();
        task.apply_edit(&TaskEdit {
            title: Some("steam milk".to_string()),
            category_id: Some(category),
            time_block: Some(TimeBlock::Evening),
        });
        assert_eq!(task.title, "steam milk");
        assert_eq!(task.category_id, category);
        assert_eq!(task.time_block, TimeBlock::Evening);
        assert_eq!(task.completed_at, Some(9_000));
        assert_eq!(task.created_at, 1_000);
    }

    #[test]
    fn validate_checks_status_timestamp_pairing() {
        let mut task = sample();
        task.status = TaskStatus::Completed;
        assert_eq!(task.validate(), Err(ModelValidationError::MissingCompletedAt));

        task.status = TaskStatus::Active;
        task.completed_at = Some(1);
        assert_eq!(
            task.validate(),
            Err(ModelValidationError::UnexpectedCompletedAt)
        );

        task.title = " ".to_string();
        assert_eq!(task.validate(), Err(ModelValidationError::BlankField("title")));
    }

    #[test]
    fn validate_rejects_dates_outside_calendar_range() {
        let mut task = sample();
        task.complete(i64::MAX / 2);
        assert_eq!(
            task.validate(),
            Err(ModelValidationError::TimestampOutOfRange("completedAt"))
        );

        let mut task = sample();
        task.created_at = i64::MIN;
        assert_eq!(
            task.validate(),
            Err(ModelValidationError::TimestampOutOfRange("createdAt"))
        );
    }

    #[test]
    fn serde_uses_camel_case_and_omits_missing_completion() {
        let task = sample();
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("categoryId").is_some());
        assert_eq!(value["timeBlock"], "morning");
        assert_eq!(value["status"], "active");
        assert!(value.get("completedAt").is_none());
    }
}
