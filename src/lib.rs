// src/lib.rs

pub mod api;
pub mod attempt;
pub mod config;
pub mod error;
pub mod models;
pub mod progress;
pub mod utils;

// Re-export the two behavioral entry points for convenience
pub use attempt::{AttemptController, AttemptState};
pub use progress::ProgressTracker;
