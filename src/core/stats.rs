use chrono::NaiveDate;

use super::task::Task;

/// Aggregate counters over the full task list, independent of the current
/// selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Tasks due on the evaluation date, completed or not.
    pub due_today: usize,
}

impl Stats {
    pub fn collect(tasks: &[Task], today: NaiveDate) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let due_today = tasks.iter().filter(|t| t.is_due_on(today)).count();

        Self {
            total,
            completed,
            pending: total - completed,
            due_today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn counts_are_taken_from_the_full_list() {
        let today = date(2026, 3, 10);
        let mut done = Task::new("done");
        done.completed = true;
        done.due_date = Some(today);
        let mut open = Task::new("open");
        open.due_date = Some(today);
        let undated = Task::new("undated");

        let stats = Stats::collect(&[done, open, undated], today);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
        // Due-today includes completed tasks.
        assert_eq!(stats.due_today, 2);
    }

    #[test]
    fn undated_tasks_still_count_as_pending() {
        let stats = Stats::collect(&[Task::new("undated")], date(2026, 3, 10));
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.due_today, 0);
    }

    #[test]
    fn empty_list_yields_zeroes() {
        let stats = Stats::collect(&[], date(2026, 3, 10));
        assert_eq!(
            stats,
            Stats {
                total: 0,
                completed: 0,
                pending: 0,
                due_today: 0
            }
        );
    }
}
