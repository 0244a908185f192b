use std::cmp::Reverse;

use chrono::NaiveDate;

use super::selection::{Filter, Selection, SortOrder};
use super::task::{Priority, Task};

/// Pane sizes for header display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewCounts {
    pub today: usize,
    pub upcoming: usize,
}

/// Derived two-pane task view for the current selection.
///
/// For the finished filter every match lands in the `today` pane and
/// `upcoming` stays empty; the panes are then rendered as a single list.
#[derive(Debug, Clone)]
pub struct TaskView {
    pub today: Vec<Task>,
    pub upcoming: Vec<Task>,
}

impl TaskView {
    /// Builds the view for `selection` as of `today`.
    ///
    /// Pipeline: restrict to the selected project, apply the status filter,
    /// apply the search term, stable-sort by priority, then split into the
    /// date panes. Tasks without a due date (and tasks already past due)
    /// match the filters but fall out of both panes; they still count in
    /// the aggregate statistics.
    pub fn build(tasks: &[Task], selection: &Selection, today: NaiveDate) -> Self {
        let mut matched: Vec<Task> = tasks
            .iter()
            .filter(|t| match selection.project.as_deref() {
                Some(name) => t.project.as_deref() == Some(name),
                None => true,
            })
            .filter(|t| match selection.filter {
                Filter::All => !t.completed,
                Filter::Important => !t.completed && t.priority == Some(Priority::High),
                Filter::Today => !t.completed && t.is_due_on(today),
                Filter::Upcoming => !t.completed && t.is_due_after(today),
                Filter::Finished => t.completed,
            })
            .cloned()
            .collect();

        if let Some(term) = selection.search.as_deref().map(str::trim) {
            if !term.is_empty() {
                matched.retain(|t| t.matches_search(term));
            }
        }

        match selection.sort {
            SortOrder::LowToHigh => matched.sort_by_key(|t| t.priority_value()),
            SortOrder::HighToLow => matched.sort_by_key(|t| Reverse(t.priority_value())),
        }

        if selection.filter == Filter::Finished {
            return Self {
                today: matched,
                upcoming: Vec::new(),
            };
        }

        let mut today_pane = Vec::new();
        let mut upcoming_pane = Vec::new();
        for task in matched {
            if task.is_due_on(today) {
                today_pane.push(task);
            } else if task.is_due_after(today) {
                upcoming_pane.push(task);
            }
        }

        Self {
            today: today_pane,
            upcoming: upcoming_pane,
        }
    }

    pub fn counts(&self) -> ViewCounts {
        ViewCounts {
            today: self.today.len(),
            upcoming: self.upcoming.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.today.is_empty() && self.upcoming.is_empty()
    }
}
