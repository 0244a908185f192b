use std::rc::Rc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::task::{Priority, Task, TaskDraft, TaskPatch};
use crate::storage::{StorageProvider, TASKS_KEY};

use super::StoreError;

/// Owns the ordered task list (newest-created first) and writes it back to
/// storage after every mutation.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Rc<dyn StorageProvider>,
}

impl TaskStore {
    /// Loads the task list, falling back to the starter tasks when the blob
    /// is absent or unreadable. Seeds are kept in memory only until the
    /// first mutation writes them out.
    pub fn load(storage: Rc<dyn StorageProvider>, today: NaiveDate) -> Self {
        let tasks = match storage.get(TASKS_KEY) {
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(tasks) => tasks,
                Err(e) => {
                    log::warn!("Corrupt task blob, starting over with defaults: {}", e);
                    seed_tasks(today)
                }
            },
            None => seed_tasks(today),
        };
        log::debug!("Loaded {} tasks", tasks.len());
        Self { tasks, storage }
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Creates a task from the draft and prepends it to the list.
    pub fn add(&mut self, draft: TaskDraft) -> Result<&Task, StoreError> {
        if draft.title.trim().is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        self.tasks.insert(0, draft.into_task());
        self.save();
        Ok(&self.tasks[0])
    }

    /// Applies a partial update to the task with the given id.
    pub fn update(&mut self, id: Uuid, patch: &TaskPatch) -> Result<&Task, StoreError> {
        if patch.blanks_title() {
            return Err(StoreError::EmptyTitle);
        }
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        patch.apply(&mut self.tasks[idx]);
        self.save();
        Ok(&self.tasks[idx])
    }

    /// Removes the task if present. Removing an unknown id is a no-op, not
    /// an error.
    pub fn remove(&mut self, id: Uuid) {
        self.tasks.retain(|t| t.id != id);
        self.save();
    }

    /// Flips the completion flag. The returned task tells the caller which
    /// way it went.
    pub fn toggle(&mut self, id: Uuid) -> Result<&Task, StoreError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        self.tasks[idx].completed = !self.tasks[idx].completed;
        self.save();
        Ok(&self.tasks[idx])
    }

    /// Deletes every task assigned to `project` and reports how many went.
    /// Remaining tasks keep their relative order.
    pub(super) fn remove_project_tasks(&mut self, project: &str) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.project.as_deref() != Some(project));
        self.save();
        before - self.tasks.len()
    }

    fn save(&self) {
        match serde_json::to_string_pretty(&self.tasks) {
            Ok(blob) => {
                if let Err(e) = self.storage.set(TASKS_KEY, &blob) {
                    log::error!("Failed to save tasks: {}", e);
                }
            }
            Err(e) => log::error!("Failed to serialize tasks: {}", e),
        }
    }
}

fn seed_tasks(today: NaiveDate) -> Vec<Task> {
    let tomorrow = today.succ_opt().unwrap_or(today);

    let mut welcome = Task::new("Welcome to TaskFlow!");
    welcome.description = Some("This is your first task. Mark it done when you're ready.".into());
    welcome.due_date = Some(today);
    welcome.priority = Some(Priority::Medium);
    welcome.project = Some("Personal".into());

    let mut plan = Task::new("Plan your week");
    plan.description = Some("Set up your weekly goals and priorities.".into());
    plan.due_date = Some(tomorrow);
    plan.priority = Some(Priority::High);
    plan.project = Some("Personal".into());

    vec![welcome, plan]
}
