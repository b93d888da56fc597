// src/models/attempt.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an attempt. There is no pause or cancel state;
/// the only terminal transition is finishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptStatus {
    InProgress,
    Finished,
}

/// One timed run through a quiz's questions, as recorded server-side.
/// Scoring fields stay null until the attempt is finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: String,
    pub quiz_id: String,

    /// 1-based ordinal, per user per quiz.
    pub attempt_number: u32,

    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: AttemptStatus,

    pub total_score: Option<f64>,
    pub max_score: Option<f64>,
    pub percentage: Option<f64>,
    pub passed: Option<bool>,
}

/// Response of the attempt-creation mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedAttempt {
    pub attempt_id: String,
    pub attempt_number: u32,
    pub started_at: DateTime<Utc>,

    /// Server-confirmed time limit; takes precedence over the quiz's own
    /// configured value when present.
    pub time_limit_minutes: Option<u32>,
}

/// Acknowledgement of a single answer submission. Correctness and points
/// may be withheld until finish, depending on quiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerReceipt {
    pub accepted: bool,
    pub is_correct: Option<bool>,
    pub points_awarded: Option<f64>,
}

/// Final scoring returned by the finish mutation. All values are
/// server-computed and treated as opaque; the client never rescores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResult {
    pub total_score: f64,
    pub max_score: f64,

    /// Percentage in 0-100.
    pub percentage: f64,

    pub passed: bool,
    pub ended_at: DateTime<Utc>,
}

impl AttemptResult {
    /// Percentage for summary views, rounded to zero decimal places.
    pub fn summary_percent(&self) -> String {
        format!("{:.0}%", self.percentage)
    }

    /// Percentage for detailed score displays, one decimal place.
    pub fn detailed_percent(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

/// The user's selection for one question, held client-side until submitted.
/// Radio-button semantics: at most one selection per question, a later
/// selection overwrites the earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerSelection {
    /// Selected option id for choice and true/false questions.
    Choice(String),
    /// Free text for short-answer questions.
    Text(String),
}

/// Aggregate view over a user's prior attempts on one quiz, used for the
/// pre-start gate and for dashboard summaries.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptHistory {
    pub count: u32,
    pub best_percentage: Option<f64>,
    pub passed: bool,
}

impl AttemptHistory {
    pub fn summarize(attempts: &[QuizAttempt]) -> Self {
        let mut best_percentage: Option<f64> = None;
        let mut passed = false;

        for attempt in attempts {
            if attempt.status != AttemptStatus::Finished {
                continue;
            }
            if let Some(pct) = attempt.percentage {
                if best_percentage.is_none_or(|best| pct > best) {
                    best_percentage = Some(pct);
                }
            }
            if attempt.passed == Some(true) {
                passed = true;
            }
        }

        Self {
            count: attempts.len() as u32,
            best_percentage,
            passed,
        }
    }
}
