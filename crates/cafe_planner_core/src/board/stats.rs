//! Dashboard statistics over the whole task collection.

use crate::board::lanes::completion_percentage;
use crate::model::category::{Category, CategoryId, SPECIAL_ORDER_LABEL};
use crate::model::task::{Task, TimeBlock};
use crate::time::{reference_date, reference_day_start};
use chrono::NaiveDate;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub completed: usize,
}

impl Tally {
    fn add(&mut self, task: &Task) {
        self.total += 1;
        if task.is_completed() {
            self.completed += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBlockStats {
    pub time_block: TimeBlock,
    pub tally: Tally,
}

/// Per-category tally. `category_id` is `None` for the "Special Order"
/// bucket that collects tasks whose category is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStats {
    pub category_id: Option<CategoryId>,
    pub label: String,
    pub tally: Tally,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub completion_percentage: u8,
    pub completed_today: usize,
    /// Consecutive reference days with at least one completion, ending today
    /// or yesterday.
    pub streak_days: u32,
    pub by_time_block: Vec<TimeBlockStats>,
    /// Menu order, with "Special Order" last when present.
    pub by_category: Vec<CategoryStats>,
}

/// Computes dashboard numbers as of `now_ms`.
pub fn compute(tasks: &[Task], categories: &[Category], now_ms: i64) -> PlannerStats {
    let day_start = reference_day_start(now_ms);
    let completed = tasks.iter().filter(|task| task.is_completed()).count();
    let completed_today = tasks
        .iter()
        .filter(|task| task.completed_at.is_some_and(|at| at >= day_start))
        .count();

    let by_time_block = TimeBlock::ALL
        .iter()
        .map(|&time_block| {
            let mut tally = Tally::default();
            tasks
                .iter()
                .filter(|task| task.time_block == time_block)
                .for_each(|task| tally.add(task));
            TimeBlockStats { time_block, tally }
        })
        .collect();

    let mut by_category = categories
        .iter()
        .map(|category| CategoryStats {
            category_id: Some(category.id),
            label: category.label.clone(),
            tally: Tally::default(),
        })
        .collect::<Vec<_>>();
    let mut orphans = Tally::default();
    for task in tasks {
        match by_category
            .iter_mut()
            .find(|entry| entry.category_id == Some(task.category_id))
        {
            Some(entry) => entry.tally.add(task),
            None => orphans.add(task),
        }
    }
    if orphans.total > 0 {
        by_category.push(CategoryStats {
            category_id: None,
            label: SPECIAL_ORDER_LABEL.to_string(),
            tally: orphans,
        });
    }

    PlannerStats {
        total: tasks.len(),
        active: tasks.len() - completed,
        completed,
        completion_percentage: completion_percentage(tasks),
        completed_today,
        streak_days: streak_days(tasks, now_ms),
        by_time_block,
        by_category,
    }
}

fn streak_days(tasks: &[Task], now_ms: i64) -> u32 {
    let days = tasks
        .iter()
        .filter_map(|task| task.completed_at)
        .map(reference_date)
        .collect::<BTreeSet<NaiveDate>>();

    let today = reference_date(now_ms);
    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::compute;
    use crate::model::category::{Category, SPECIAL_ORDER_LABEL};
    use crate::model::task::{Task, TimeBlock};
    use crate::model::theme::Theme;
    use crate::time::DAY_MS;
    use uuid::Uuid;

    const NOW_MS: i64 = 1_710_050_000_000;

    #[test]
    fn compute_tallies_lanes_categories_and_orphans() {
        let coffee = Category::new("Coffee", "☕", Theme::Mocha);
        let tea = Category::new("Tea", "🍵", Theme::Matcha);
        let categories = vec![coffee.clone(), tea.clone()];

        let mut done_today = Task::new("brew", coffee.id, TimeBlock::Morning, 0);
        done_today.complete(NOW_MS);
        let mut done_yesterday = Task::new("steep", tea.id, TimeBlock::Evening, 0);
        done_yesterday.complete(NOW_MS - DAY_MS);
        let tasks = vec![
            done_today,
            done_yesterday,
            Task::new("grind", coffee.id, TimeBlock::Morning, 0),
            Task::new("mystery", Uuid::new_v4(), TimeBlock::Afternoon, 0),
        ];

        let stats = compute(&tasks, &categories, NOW_MS);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.completion_percentage, 50);
        assert_eq!(stats.completed_today, 1);
        assert_eq!(stats.streak_days, 2);

        assert_eq!(stats.by_time_block[0].tally.total, 2);
        assert_eq!(stats.by_time_block[0].tally.completed, 1);
        assert_eq!(stats.by_time_block[1].tally.total, 1);

        assert_eq!(stats.by_category.len(), 3);
        assert_eq!(stats.by_category[0].label, "Coffee");
        assert_eq!(stats.by_category[0].tally.total, 2);
        assert_eq!(stats.by_category[2].label, SPECIAL_ORDER_LABEL);
        assert_eq!(stats.by_category[2].category_id, None);
    }

    #[test]
    fn streak_breaks_on_missing_day() {
        let category = Uuid::new_v4();
        let mut old = Task::new("old", category, TimeBlock::Morning, 0);
        old.complete(NOW_MS - 2 * DAY_MS);
        let stats = compute(&[old], &[], NOW_MS);
        assert_eq!(stats.streak_days, 0);
        assert_eq!(stats.completed_today, 0);
    }
}
