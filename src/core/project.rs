use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tag colors cycled through when creating projects.
pub const PALETTE: [&str; 6] = [
    "#6366f1", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4",
];

/// A named grouping label for tasks. The name doubles as the key tasks
/// reference; a task may keep referencing a deleted project's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub color: String,
}

impl Project {
    /// Creates a project with a randomly picked palette color.
    pub fn new(name: impl Into<String>) -> Self {
        let color = PALETTE[rand::rng().random_range(0..PALETTE.len())];
        Self::with_color(name, color)
    }

    pub fn with_color(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}
