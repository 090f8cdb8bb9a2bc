//! Stale completed-ticket rule.

use crate::model::task::{Task, TaskStatus};
use crate::time::reference_day_start;

/// Whether `task` belongs on the active board at `now_ms`.
///
/// Active tasks always show. Completed tasks show only while their
/// completion falls on or after the start of the current reference day; a
/// completed task without a timestamp counts as stale.
pub fn is_visible_on_board(task: &Task, now_ms: i64) -> bool {
    match task.status {
        TaskStatus::Active => true,
        TaskStatus::Completed => task
            .completed_at
            .is_some_and(|completed_at| completed_at >= reference_day_start(now_ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::is_visible_on_board;
    use crate::model::task::{Task, TaskStatus, TimeBlock};
    use crate::time::reference_day_start;
    use uuid::Uuid;

    const NOW_MS: i64 = 1_710_050_000_000;

    fn task() -> Task {
        Task::new("grind beans", Uuid::new_v4(), TimeBlock::Morning, 0)
    }

    #[test]
    fn active_tasks_are_always_visible() {
        assert!(is_visible_on_board(&task(), NOW_MS));
    }

    #[test]
    fn completion_before_day_start_is_hidden() {
        let day_start = reference_day_start(NOW_MS);
        let mut stale = task();
        stale.complete(day_start - 1);
        assert!(!is_visible_on_board(&stale, NOW_MS));

        let mut fresh = task();
        fresh.complete(day_start);
        assert!(is_visible_on_board(&fresh, NOW_MS));
    }

    #[test]
    fn completed_without_timestamp_is_hidden() {
        let mut broken = task();
        broken.status = TaskStatus::Completed;
        assert!(!is_visible_on_board(&broken, NOW_MS));
    }
}
