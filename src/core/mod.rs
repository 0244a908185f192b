pub mod project;
pub mod selection;
pub mod stats;
pub mod task;
pub mod view;
