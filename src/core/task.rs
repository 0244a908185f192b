use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_keyword(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Numeric weight used for priority ordering.
    pub fn value(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(s)
            .ok_or_else(|| format!("unknown priority '{s}' (expected low, medium or high)"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub project: Option<String>,
    pub completed: bool,
    pub created_at: NaiveDateTime,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            due_date: None,
            priority: None,
            project: None,
            completed: false,
            created_at: chrono::Local::now().naive_local(),
        }
    }

    /// Priority weight with unset treated as 0 (sorts below low).
    pub fn priority_value(&self) -> u8 {
        self.priority.map(|p| p.value()).unwrap_or(0)
    }

    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.due_date == Some(date)
    }

    /// True when the task has a due date strictly after `date`.
    pub fn is_due_after(&self, date: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due > date)
    }

    /// Case-insensitive substring match against title and description.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        if self.title.to_lowercase().contains(&needle) {
            return true;
        }
        self.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}

/// Input for task creation. Everything beyond the title is optional.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub project: Option<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            priority: None,
            project: None,
        }
    }

    pub(crate) fn into_task(self) -> Task {
        let mut task = Task::new(self.title);
        task.description = self.description;
        task.due_date = self.due_date;
        task.priority = self.priority;
        task.project = self.project;
        task
    }
}

/// Partial update for a task. Only fields that were explicitly set are
/// written; the `clear_*` setters reset an optional field to none.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<Option<String>>,
    due_date: Option<Option<NaiveDate>>,
    priority: Option<Option<Priority>>,
    project: Option<Option<String>>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    pub fn due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(Some(due));
        self
    }

    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(Some(priority));
        self
    }

    pub fn clear_priority(mut self) -> Self {
        self.priority = Some(None);
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(Some(project.into()));
        self
    }

    pub fn clear_project(mut self) -> Self {
        self.project = Some(None);
        self
    }

    /// True when the patch would overwrite the title with a blank string.
    pub fn blanks_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| t.trim().is_empty())
    }

    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(project) = &self.project {
            task.project = project.clone();
        }
    }
}
