// src/models/progress.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted observation of a lesson's watch progress. The server copy
/// is the durable record; the client accumulator is discarded on unmount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub lesson_id: String,

    /// Accumulated genuine viewing time, monotonically non-decreasing
    /// within a session.
    pub watched_seconds: f64,

    pub duration_seconds: f64,

    /// Derived watched percentage, capped at 100.
    pub progress_percent: f64,

    pub completed: bool,
    pub observed_at: DateTime<Utc>,
}

/// Tuning knobs of the watch-progress accumulator.
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Position deltas at or above this bound are treated as seeks and
    /// never accumulate as viewing time.
    pub seek_guard_secs: f64,

    /// Watched-percent above which the lesson counts as done regardless of
    /// the exact remaining seconds.
    pub completion_threshold_percent: f64,

    /// Minimum wall-clock spacing between non-completion snapshot flushes.
    pub flush_interval_secs: i64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            seek_guard_secs: 2.0,
            completion_threshold_percent: 90.0,
            flush_interval_secs: 30,
        }
    }
}
