// src/progress.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    api::LmsApi,
    models::progress::{ProgressConfig, ProgressSnapshot},
    utils::clock::{Clock, SystemClock},
};

/// Accumulates genuine viewing time for one lesson's video and persists
/// snapshots to the server at a bounded rate.
///
/// One tracker per lesson mount; the accumulator starts at zero and is
/// discarded on unmount — the server copy is the durable record. The
/// seek-guard ensures the accumulator approximates actual viewing time,
/// not raw position range: scrubbing to the end does not inflate progress.
///
/// Persistence is best-effort telemetry. Failures are logged and never
/// surfaced to the viewer.
pub struct ProgressTracker {
    api: Arc<dyn LmsApi>,
    clock: Arc<dyn Clock>,
    config: ProgressConfig,
    lesson_id: String,

    accumulated_seconds: f64,
    last_position: f64,
    duration_seconds: f64,
    last_flush: DateTime<Utc>,
    completed: bool,
}

impl ProgressTracker {
    pub fn new(api: Arc<dyn LmsApi>, lesson_id: impl Into<String>) -> Self {
        Self::with_clock(
            api,
            lesson_id,
            ProgressConfig::default(),
            Arc::new(SystemClock),
        )
    }

    pub fn with_clock(
        api: Arc<dyn LmsApi>,
        lesson_id: impl Into<String>,
        config: ProgressConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let last_flush = clock.now();
        Self {
            api,
            clock,
            config,
            lesson_id: lesson_id.into(),
            accumulated_seconds: 0.0,
            last_position: 0.0,
            duration_seconds: 0.0,
            last_flush,
            completed: false,
        }
    }

    /// Processes one playback position sample. Called at high frequency by
    /// the video surface (multiple times per second).
    ///
    /// A position delta accumulates only when `0 < delta < seek_guard`:
    /// backward seeks and large forward jumps are ignored. The first
    /// crossing of the completion threshold triggers one unconditional
    /// flush at 100%; otherwise snapshots are throttled to one per flush
    /// interval. After completion no further snapshots are sent.
    pub async fn observe(&mut self, position_seconds: f64, duration_seconds: f64) {
        let delta = position_seconds - self.last_position;
        if delta > 0.0 && delta < self.config.seek_guard_secs {
            self.accumulated_seconds += delta;
        }
        self.last_position = position_seconds;
        self.duration_seconds = duration_seconds;

        if self.completed {
            return;
        }

        let percent = self.percent();
        if percent >= self.config.completion_threshold_percent {
            self.completed = true;
            self.flush_snapshot(100.0).await;
            return;
        }

        let now = self.clock.now();
        if (now - self.last_flush).num_seconds() >= self.config.flush_interval_secs {
            self.flush_snapshot(percent).await;
        }
    }

    /// Explicit final flush, meant to be called when the lesson view
    /// unmounts so the trailing partial progress is not lost. No-op after
    /// completion (the 100% snapshot already went out) or when nothing has
    /// accumulated yet.
    pub async fn flush(&mut self) {
        if self.completed || self.accumulated_seconds <= 0.0 {
            return;
        }
        let percent = self.percent();
        self.flush_snapshot(percent).await;
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn watched_seconds(&self) -> f64 {
        self.accumulated_seconds
    }

    fn percent(&self) -> f64 {
        if self.duration_seconds <= 0.0 {
            return 0.0;
        }
        (self.accumulated_seconds / self.duration_seconds * 100.0).min(100.0)
    }

    async fn flush_snapshot(&mut self, progress_percent: f64) {
        let now = self.clock.now();
        let snapshot = ProgressSnapshot {
            lesson_id: self.lesson_id.clone(),
            watched_seconds: self.accumulated_seconds,
            duration_seconds: self.duration_seconds,
            progress_percent,
            completed: self.completed,
            observed_at: now,
        };

        if let Err(e) = self.api.update_progress(&snapshot).await {
            tracing::warn!(
                "failed to persist watch progress for lesson {}: {}",
                self.lesson_id,
                e
            );
        }
        self.last_flush = now;
    }
}
