pub mod config;
pub mod habit;
pub mod notes;
pub mod task;
pub mod timer;
pub mod water;
