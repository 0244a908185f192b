use std::rc::Rc;

use crate::core::project::Project;
use crate::storage::{PROJECTS_KEY, StorageProvider};

use super::StoreError;

/// Owns the project list, persisted under its own blob key.
pub struct ProjectStore {
    projects: Vec<Project>,
    storage: Rc<dyn StorageProvider>,
}

impl ProjectStore {
    /// Loads the project list, seeding the two defaults when the blob is
    /// absent or unreadable.
    pub fn load(storage: Rc<dyn StorageProvider>) -> Self {
        let projects = match storage.get(PROJECTS_KEY) {
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(projects) => projects,
                Err(e) => {
                    log::warn!("Corrupt project blob, starting over with defaults: {}", e);
                    seed_projects()
                }
            },
            None => seed_projects(),
        };
        Self { projects, storage }
    }

    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Appends a project with a palette color. The trimmed name must be
    /// non-empty and unused.
    pub fn add(&mut self, name: &str) -> Result<&Project, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyProjectName);
        }
        if self.projects.iter().any(|p| p.name == name) {
            return Err(StoreError::DuplicateProject(name.to_string()));
        }
        self.projects.push(Project::new(name));
        self.save();
        Ok(&self.projects[self.projects.len() - 1])
    }

    /// Removes the project if present. The task-side cascade is handled by
    /// the manager.
    pub fn remove(&mut self, name: &str) {
        self.projects.retain(|p| p.name != name);
        self.save();
    }

    fn save(&self) {
        match serde_json::to_string_pretty(&self.projects) {
            Ok(blob) => {
                if let Err(e) = self.storage.set(PROJECTS_KEY, &blob) {
                    log::error!("Failed to save projects: {}", e);
                }
            }
            Err(e) => log::error!("Failed to serialize projects: {}", e),
        }
    }
}

fn seed_projects() -> Vec<Project> {
    vec![
        Project::with_color("Personal", "#6366f1"),
        Project::with_color("Work", "#10b981"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::PALETTE;
    use crate::storage::memory::MemoryStorage;

    fn empty_store() -> (Rc<MemoryStorage>, ProjectStore) {
        let storage = Rc::new(MemoryStorage::new());
        storage.set(PROJECTS_KEY, "[]").unwrap();
        let store = ProjectStore::load(storage.clone());
        (storage, store)
    }

    #[test]
    fn absent_blob_seeds_personal_and_work() {
        let storage = Rc::new(MemoryStorage::new());
        let store = ProjectStore::load(storage.clone());

        assert_eq!(
            store.all(),
            [
                Project::with_color("Personal", "#6366f1"),
                Project::with_color("Work", "#10b981"),
            ]
        );
        // Seeds stay in memory until a mutation writes them out.
        assert_eq!(storage.get(PROJECTS_KEY), None);
    }

    #[test]
    fn corrupt_blob_seeds_defaults() {
        let storage = Rc::new(MemoryStorage::with_entry(PROJECTS_KEY, "{not json"));
        let store = ProjectStore::load(storage);
        assert_eq!(store.all().len(), 2);
    }

    #[test]
    fn add_assigns_a_palette_color_and_persists() {
        let (storage, mut store) = empty_store();

        let project = store.add("Garden").unwrap();
        assert_eq!(project.name, "Garden");
        assert!(PALETTE.contains(&project.color.as_str()));

        let reloaded = ProjectStore::load(storage);
        assert!(reloaded.get("Garden").is_some());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let (_storage, mut store) = empty_store();
        store.add("Work").unwrap();

        assert_eq!(
            store.add("Work"),
            Err(StoreError::DuplicateProject("Work".into()))
        );
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn blank_names_are_rejected() {
        let (_storage, mut store) = empty_store();
        assert_eq!(store.add("  "), Err(StoreError::EmptyProjectName));
        assert!(store.all().is_empty());
    }

    #[test]
    fn add_trims_the_name_before_checking() {
        let (_storage, mut store) = empty_store();
        store.add("Work").unwrap();
        assert_eq!(
            store.add("  Work "),
            Err(StoreError::DuplicateProject("Work".into()))
        );
    }

    #[test]
    fn remove_is_a_no_op_for_unknown_names() {
        let (_storage, mut store) = empty_store();
        store.add("Keep").unwrap();
        store.remove("Gone");
        assert_eq!(store.all().len(), 1);
    }
}
