//! History archive: completed tickets that have dropped off the board.

use crate::board::visibility::is_visible_on_board;
use crate::model::task::Task;
use crate::time::reference_date;
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Completed tickets sharing one reference-day completion date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryDay {
    pub date: NaiveDate,
    /// Newest completion first.
    pub tasks: Vec<Task>,
}

/// Groups completed tasks no longer on the board by completion date,
/// newest day first.
pub fn archive(tasks: &[Task], now_ms: i64) -> Vec<HistoryDay> {
    let mut days: BTreeMap<Reverse<NaiveDate>, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        if !task.is_completed() || is_visible_on_board(task, now_ms) {
            continue;
        }
        let Some(completed_at) = task.completed_at else {
            continue;
        };
        days.entry(Reverse(reference_date(completed_at)))
            .or_default()
            .push(task.clone());
    }

    days.into_iter()
        .map(|(Reverse(date), mut tasks)| {
            tasks.sort_by_key(|task| (Reverse(task.completed_at), task.id));
            HistoryDay { date, tasks }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::archive;
    use crate::model::task::{Task, TimeBlock};
    use crate::time::DAY_MS;
    use chrono::NaiveDate;
    use uuid::Uuid;

    // 2024-03-10T13:53:20+08:00
    const NOW_MS: i64 = 1_710_050_000_000;

    fn completed(title: &str, completed_at: i64) -> Task {
        let mut task = Task::new(title, Uuid::new_v4(), TimeBlock::Morning, 0);
        task.complete(completed_at);
        task
    }

    #[test]
    fn archive_groups_stale_completions_newest_first() {
        let tasks = vec![
            completed("today", NOW_MS),
            completed("yesterday-early", NOW_MS - DAY_MS - 60_000),
            completed("two-days", NOW_MS - 2 * DAY_MS),
            completed("yesterday-late", NOW_MS - DAY_MS),
            Task::new("active", Uuid::new_v4(), TimeBlock::Evening, 0),
        ];

        let history = archive(&tasks, NOW_MS);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        let titles = history[0]
            .tasks
            .iter()
            .map(|task| task.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["yesterday-late", "yesterday-early"]);
        assert_eq!(history[1].date, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
    }
}
