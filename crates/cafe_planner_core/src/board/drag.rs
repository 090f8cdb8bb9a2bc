//! Drag-and-drop reassignment over the in-memory task list.
//!
//! # Invariants
//! - A drop into another lane changes only the dragged task's `time_block`.
//! - A drop onto a task in the same lane changes only list order.
//! - Order lives in the in-memory list; nothing here is persisted.

use crate::model::task::{Task, TaskId, TimeBlock};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// What the dragged ticket was released over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Another ticket; its lane becomes the destination lane.
    Task(TaskId),
    /// A lane body, typically an empty one.
    Lane(TimeBlock),
}

/// Net effect of one drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    LaneChanged { from: TimeBlock, to: TimeBlock },
    Reordered { from_index: usize, to_index: usize },
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragError {
    TaskNotFound(TaskId),
}

impl Display for DragError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "dragged or target task not found: {id}"),
        }
    }
}

impl Error for DragError {}

/// Hover step: retargets the active task's lane when the target sits in a
/// different lane. Returns `(from, to)` when the lane changed.
pub fn drag_over(
    tasks: &mut [Task],
    active_id: TaskId,
    target: DropTarget,
) -> Result<Option<(TimeBlock, TimeBlock)>, DragError> {
    let target_lane = target_lane(tasks, target)?;
    let active = tasks
        .iter_mut()
        .find(|task| task.id == active_id)
        .ok_or(DragError::TaskNotFound(active_id))?;

    if active.time_block == target_lane {
        return Ok(None);
    }
    let from = active.time_block;
    active.time_block = target_lane;
    Ok(Some((from, target_lane)))
}

/// Release step: array-moves the active task onto the target task's index
/// when both share a lane. Returns `(from_index, to_index)` on a move.
pub fn drag_end(
    tasks: &mut Vec<Task>,
    active_id: TaskId,
    target: DropTarget,
) -> Result<Option<(usize, usize)>, DragError> {
    let from_index = index_of(tasks, active_id)?;
    let DropTarget::Task(over_id) = target else {
        return Ok(None);
    };
    if over_id == active_id {
        return Ok(None);
    }
    let to_index = index_of(tasks, over_id)?;
    if tasks[from_index].time_block != tasks[to_index].time_block {
        return Ok(None);
    }

    let moved = tasks.remove(from_index);
    tasks.insert(to_index, moved);
    Ok(Some((from_index, to_index)))
}

/// Full drop: hover then release. A lane change wins; the ticket is not
/// also reordered inside its new lane.
pub fn apply_drop(
    tasks: &mut Vec<Task>,
    active_id: TaskId,
    target: DropTarget,
) -> Result<DragOutcome, DragError> {
    if let Some((from, to)) = drag_over(tasks, active_id, target)? {
        return Ok(DragOutcome::LaneChanged { from, to });
    }
    Ok(match drag_end(tasks, active_id, target)? {
        Some((from_index, to_index)) => DragOutcome::Reordered {
            from_index,
            to_index,
        },
        None => DragOutcome::Unchanged,
    })
}

fn target_lane(tasks: &[Task], target: DropTarget) -> Result<TimeBlock, DragError> {
    match target {
        DropTarget::Lane(time_block) => Ok(time_block),
        DropTarget::Task(id) => tasks
            .iter()
            .find(|task| task.id == id)
            .map(|task| task.time_block)
            .ok_or(DragError::TaskNotFound(id)),
    }
}

fn index_of(tasks: &[Task], id: TaskId) -> Result<usize, DragError> {
    tasks
        .iter()
        .position(|task| task.id == id)
        .ok_or(DragError::TaskNotFound(id))
}
