//! Task use-case service.
//!
//! # Responsibility
//! - Create, edit, toggle and delete order tickets.
//! - Project the board and history archive from stored tasks.
//! - Apply drag-and-drop to the caller's in-memory list, persisting only
//!   lane changes.
//!
//! # Invariants
//! - `category_id` is not checked against stored categories at write time.
//! - List order from drag reordering is never written to storage.

use crate::board::drag::{apply_drop, DragOutcome, DropTarget};
use crate::board::history::{archive, HistoryDay};
use crate::board::lanes::Board;
use crate::model::category::CategoryId;
use crate::model::task::{Task, TaskEdit, TaskId, TimeBlock};
use crate::repo::CollectionRepository;
use crate::service::{ServiceError, ServiceResult};
use log::{debug, info};

const COLLECTION: &str = "tasks";

/// Task service facade over a task collection.
pub struct TaskService<R: CollectionRepository<Item = Task>> {
    repo: R,
}

impl<R: CollectionRepository<Item = Task>> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an active ticket in `time_block`.
    pub fn create_task(
        &self,
        title: &str,
        category_id: CategoryId,
        time_block: TimeBlock,
        now_ms: i64,
    ) -> ServiceResult<Task> {
        let task = Task::new(title, category_id, time_block, now_ms);
        self.repo.put(&task)?;
        info!(
            "event=task_create module=service status=ok time_block={}",
            time_block.as_str()
        );
        Ok(task)
    }

    /// Applies an edit to title, category and/or lane.
    pub fn edit_task(&self, id: TaskId, edit: &TaskEdit) -> ServiceResult<Task> {
        let mut task = self.require(id)?;
        task.apply_edit(edit);
        self.repo.put(&task)?;
        info!("event=task_edit module=service status=ok");
        Ok(task)
    }

    /// Flips active/completed, stamping or clearing `completed_at`.
    pub fn toggle_task(&self, id: TaskId, now_ms: i64) -> ServiceResult<Task> {
        let mut task = self.require(id)?;
        task.toggle(now_ms);
        self.repo.put(&task)?;
        info!(
            "event=task_toggle module=service status=ok new_status={}",
            task.status.as_str()
        );
        Ok(task)
    }

    pub fn delete_task(&self, id: TaskId) -> ServiceResult<()> {
        self.repo.delete(id)?;
        info!("event=task_delete module=service status=ok");
        Ok(())
    }

    pub fn get_task(&self, id: TaskId) -> ServiceResult<Option<Task>> {
        Ok(self.repo.get(id)?)
    }

    pub fn list_tasks(&self) -> ServiceResult<Vec<Task>> {
        Ok(self.repo.get_all()?)
    }

    /// Board as seen at `now_ms`; stale completions are left out.
    pub fn board(&self, now_ms: i64) -> ServiceResult<Board> {
        let tasks = self.repo.get_all()?;
        Ok(Board::build(&tasks, now_ms))
    }

    /// Completed tickets that have dropped off the board, grouped by day.
    pub fn history(&self, now_ms: i64) -> ServiceResult<Vec<HistoryDay>> {
        let tasks = self.repo.get_all()?;
        Ok(archive(&tasks, now_ms))
    }

    /// Applies one drop to the caller's in-memory list.
    ///
    /// A lane change updates only the stored row's lane; a same-lane
    /// reorder only rearranges `tasks`.
    pub fn move_task(
        &self,
        tasks: &mut Vec<Task>,
        active_id: TaskId,
        target: DropTarget,
    ) -> ServiceResult<DragOutcome> {
        let outcome = apply_drop(tasks, active_id, target)?;
        match outcome {
            DragOutcome::LaneChanged { from, to } => {
                // The caller's copy may be stale; only the lane is written.
                let mut stored = self.require(active_id)?;
                stored.time_block = to;
                self.repo.put(&stored)?;
                info!(
                    "event=task_move module=service status=ok from={} to={}",
                    from.as_str(),
                    to.as_str()
                );
            }
            DragOutcome::Reordered {
                from_index,
                to_index,
            } => debug!(
                "event=task_reorder module=service status=ok from_index={from_index} to_index={to_index}"
            ),
            DragOutcome::Unchanged => {}
        }
        Ok(outcome)
    }

    fn require(&self, id: TaskId) -> ServiceResult<Task> {
        self.repo.get(id)?.ok_or(ServiceError::NotFound {
            collection: COLLECTION,
            id,
        })
    }
}
