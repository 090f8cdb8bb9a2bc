//! Three-lane board projection.

use crate::board::visibility::is_visible_on_board;
use crate::model::task::{Task, TimeBlock};

/// One time-block column of visible tickets, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    pub time_block: TimeBlock,
    pub tasks: Vec<Task>,
}

/// Visible board: morning, afternoon and evening lanes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub lanes: [Lane; 3],
    pub completion_percentage: u8,
}

impl Board {
    /// Partitions the tasks visible at `now_ms` into lanes.
    pub fn build(tasks: &[Task], now_ms: i64) -> Self {
        let visible = tasks
            .iter()
            .filter(|task| is_visible_on_board(task, now_ms))
            .collect::<Vec<_>>();

        let lanes = TimeBlock::ALL.map(|time_block| Lane {
            time_block,
            tasks: visible
                .iter()
                .filter(|task| task.time_block == time_block)
                .map(|task| (*task).clone())
                .collect(),
        });

        Self {
            lanes,
            completion_percentage: completion_percentage(visible.iter().copied()),
        }
    }

    pub fn lane(&self, time_block: TimeBlock) -> &Lane {
        let index = TimeBlock::ALL
            .iter()
            .position(|candidate| *candidate == time_block)
            .unwrap_or_default();
        &self.lanes[index]
    }

    pub fn visible_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.tasks.len()).sum()
    }
}

/// `round(100 * completed / total)`; `0` for an empty set.
pub fn completion_percentage<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> u8 {
    let (total, completed) = tasks.into_iter().fold((0u64, 0u64), |(total, done), task| {
        (total + 1, done + u64::from(task.is_completed()))
    });
    if total == 0 {
        return 0;
    }
    // (2 * 100 * c + t) / (2 * t) rounds half up without floats.
    ((200 * completed + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::{completion_percentage, Board};
    use crate::model::task::{Task, TimeBlock};
    use crate::time::DAY_MS;
    use uuid::Uuid;

    const NOW_MS: i64 = 1_710_050_000_000;

    fn task(title: &str, time_block: TimeBlock) -> Task {
        Task::new(title, Uuid::new_v4(), time_block, 0)
    }

    #[test]
    fn board_partitions_visible_tasks_in_lane_order() {
        let mut done_yesterday = task("yesterday", TimeBlock::Morning);
        done_yesterday.complete(NOW_MS - DAY_MS);
        let mut done_today = task("today", TimeBlock::Evening);
        done_today.complete(NOW_MS);
        let tasks = vec![
            task("a", TimeBlock::Afternoon),
            task("b", TimeBlock::Morning),
            done_yesterday,
            task("c", TimeBlock::Afternoon),
            done_today,
        ];

        let board = Board::build(&tasks, NOW_MS);
        let titles = |time_block| {
            board
                .lane(time_block)
                .tasks
                .iter()
                .map(|task| task.title.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(titles(TimeBlock::Morning), vec!["b"]);
        assert_eq!(titles(TimeBlock::Afternoon), vec!["a", "c"]);
        assert_eq!(titles(TimeBlock::Evening), vec!["today"]);
        assert_eq!(board.visible_count(), 4);
        assert_eq!(board.completion_percentage, 25);
    }

    #[test]
    fn completion_percentage_rounds_and_handles_empty() {
        assert_eq!(completion_percentage(std::iter::empty::<&Task>()), 0);

        let mut tasks = vec![
            task("a", TimeBlock::Morning),
            task("b", TimeBlock::Morning),
            task("c", TimeBlock::Morning),
        ];
        tasks[0].complete(1);
        assert_eq!(completion_percentage(&tasks), 33);
        tasks[1].complete(1);
        assert_eq!(completion_percentage(&tasks), 67);
        tasks[2].complete(1);
        assert_eq!(completion_percentage(&tasks), 100);
    }
}
