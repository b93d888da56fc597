// src/models/quiz.rs

use serde::{Deserialize, Serialize};

/// Question kind as delivered by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

/// One candidate answer of a choice question.
///
/// Correctness is never part of this shape: the server withholds it during
/// a live attempt, and the client never scores anything itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
}

/// A quiz question, fetched once per attempt.
/// Option order is fixed for the duration of an attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub text: String,
    pub question_type: QuestionType,
    pub points: f64,
    /// Empty for `SHORT_ANSWER` questions.
    #[serde(default)]
    pub options: Vec<AnswerOption>,
}

/// A quiz as configured server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub published: bool,

    /// Absent means the quiz is untimed.
    pub time_limit_minutes: Option<u32>,

    /// Passing threshold as a percentage (0-100).
    pub passing_score: f64,

    /// Maximum attempts per user; 0 means unlimited.
    #[serde(default)]
    pub max_attempts: u32,

    /// Question order is fixed; the client never reshuffles mid-attempt.
    pub questions: Vec<QuizQuestion>,
}
