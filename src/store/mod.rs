pub mod project_store;
pub mod task_store;

use std::rc::Rc;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::core::project::Project;
use crate::core::selection::Selection;
use crate::core::stats::Stats;
use crate::core::task::{Task, TaskDraft, TaskPatch};
use crate::core::view::TaskView;
use crate::storage::StorageProvider;

use project_store::ProjectStore;
use task_store::TaskStore;

/// Everything a store mutation can fail with. All variants are recoverable;
/// the stores stay untouched when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no task with id {0}")]
    TaskNotFound(Uuid),
    #[error("a project named '{0}' already exists")]
    DuplicateProject(String),
    #[error("task title cannot be empty")]
    EmptyTitle,
    #[error("project name cannot be empty")]
    EmptyProjectName,
}

/// Owns the task and project stores and coordinates the operations that
/// touch both. Constructed once per process with an injected storage
/// provider; there is no ambient global.
pub struct TaskManager {
    tasks: TaskStore,
    projects: ProjectStore,
}

impl TaskManager {
    pub fn open(storage: Rc<dyn StorageProvider>, today: NaiveDate) -> Self {
        Self {
            tasks: TaskStore::load(Rc::clone(&storage), today),
            projects: ProjectStore::load(storage),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.all()
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.all()
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.get(name)
    }

    pub fn add_task(&mut self, draft: TaskDraft) -> Result<&Task, StoreError> {
        self.tasks.add(draft)
    }

    pub fn update_task(&mut self, id: Uuid, patch: &TaskPatch) -> Result<&Task, StoreError> {
        self.tasks.update(id, patch)
    }

    pub fn remove_task(&mut self, id: Uuid) {
        self.tasks.remove(id);
    }

    pub fn toggle_task(&mut self, id: Uuid) -> Result<&Task, StoreError> {
        self.tasks.toggle(id)
    }

    pub fn add_project(&mut self, name: &str) -> Result<&Project, StoreError> {
        self.projects.add(name)
    }

    /// Deletes the project and every task assigned to it, returning the
    /// number of cascaded tasks.
    pub fn remove_project(&mut self, name: &str) -> usize {
        let removed = self.tasks.remove_project_tasks(name);
        self.projects.remove(name);
        log::info!("Removed project '{}' and {} of its tasks", name, removed);
        removed
    }

    /// Derives the two-pane view for the selection as of `today`.
    pub fn view(&self, selection: &Selection, today: NaiveDate) -> TaskView {
        TaskView::build(self.tasks.all(), selection, today)
    }

    pub fn stats(&self, today: NaiveDate) -> Stats {
        Stats::collect(self.tasks.all(), today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selection::Filter;
    use crate::storage::memory::MemoryStorage;
    use crate::storage::{PROJECTS_KEY, TASKS_KEY};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn blank_manager() -> (Rc<MemoryStorage>, TaskManager) {
        let storage = Rc::new(MemoryStorage::new());
        storage.set(TASKS_KEY, "[]").unwrap();
        storage.set(PROJECTS_KEY, "[]").unwrap();
        let manager = TaskManager::open(storage.clone(), today());
        (storage, manager)
    }

    fn draft_in(title: &str, project: Option<&str>) -> TaskDraft {
        let mut draft = TaskDraft::new(title);
        draft.project = project.map(str::to_string);
        draft
    }

    #[test]
    fn fresh_storage_opens_with_seed_data() {
        let storage = Rc::new(MemoryStorage::new());
        let manager = TaskManager::open(storage, today());

        assert_eq!(manager.tasks().len(), 2);
        assert_eq!(manager.projects().len(), 2);
        assert!(manager.project("Personal").is_some());
        assert!(manager.project("Work").is_some());
    }

    #[test]
    fn removing_a_project_cascades_to_its_tasks() {
        let (_storage, mut manager) = blank_manager();
        manager.add_project("Work").unwrap();
        manager.add_task(draft_in("keep", None)).unwrap();
        manager.add_task(draft_in("goes 1", Some("Work"))).unwrap();
        manager.add_task(draft_in("other", Some("Home"))).unwrap();
        manager.add_task(draft_in("goes 2", Some("Work"))).unwrap();

        let removed = manager.remove_project("Work");

        assert_eq!(removed, 2);
        assert!(manager.project("Work").is_none());
        let titles: Vec<_> = manager.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["other", "keep"]);
    }

    #[test]
    fn cascade_is_visible_after_reopening() {
        let (storage, mut manager) = blank_manager();
        manager.add_project("Work").unwrap();
        manager.add_task(draft_in("doomed", Some("Work"))).unwrap();
        manager.remove_project("Work");

        let reopened = TaskManager::open(storage, today());
        assert!(reopened.tasks().is_empty());
        assert!(reopened.projects().is_empty());
    }

    #[test]
    fn duplicate_project_leaves_the_list_unchanged() {
        let (_storage, mut manager) = blank_manager();
        manager.add_project("Work").unwrap();
        assert_eq!(
            manager.add_project("Work"),
            Err(StoreError::DuplicateProject("Work".into()))
        );
        assert_eq!(manager.projects().len(), 1);
    }

    #[test]
    fn tasks_may_keep_referencing_a_deleted_project() {
        let (_storage, mut manager) = blank_manager();
        manager.add_project("Side").unwrap();
        // Assigned to a project that never existed in the store.
        manager.add_task(draft_in("dangling", Some("Ghost"))).unwrap();
        manager.remove_project("Side");

        assert_eq!(manager.tasks()[0].project.as_deref(), Some("Ghost"));
    }

    #[test]
    fn view_and_stats_read_the_live_list() {
        let (_storage, mut manager) = blank_manager();
        let mut draft = TaskDraft::new("due now");
        draft.due_date = Some(today());
        let id = manager.add_task(draft).unwrap().id;
        manager.add_task(TaskDraft::new("undated")).unwrap();
        manager.toggle_task(id).unwrap();

        let stats = manager.stats(today());
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.due_today, 1);

        let finished = manager.view(&Selection::with_filter(Filter::Finished), today());
        assert_eq!(finished.today.len(), 1);
        assert_eq!(finished.today[0].id, id);
    }
}
