// src/api/mod.rs

pub mod http;
pub mod session;

use async_trait::async_trait;

use crate::{
    error::ClientError,
    models::{
        attempt::{AnswerReceipt, AnswerSelection, AttemptResult, QuizAttempt, StartedAttempt},
        progress::ProgressSnapshot,
        quiz::Quiz,
    },
};

pub use http::HttpApi;
pub use session::Session;

/// The remote-operation boundary consumed by the attempt controller and the
/// progress tracker. The real implementation is [`HttpApi`]; tests substitute
/// an in-memory fake.
#[async_trait]
pub trait LmsApi: Send + Sync {
    /// Fetches a quiz with its full (answer-free) question list.
    async fn quiz(&self, quiz_id: &str) -> Result<Quiz, ClientError>;

    /// Lists the calling user's prior attempts on a quiz.
    async fn my_attempts(&self, quiz_id: &str) -> Result<Vec<QuizAttempt>, ClientError>;

    /// Creates a new attempt on a quiz.
    async fn start_attempt(&self, quiz_id: &str) -> Result<StartedAttempt, ClientError>;

    /// Submits one question's selection. Resubmitting the same question
    /// overwrites the prior submission server-side.
    async fn submit_answer(
        &self,
        attempt_id: &str,
        question_id: &str,
        selection: &AnswerSelection,
    ) -> Result<AnswerReceipt, ClientError>;

    /// Finalizes an attempt and returns the server-computed scoring.
    async fn finish_attempt(&self, attempt_id: &str) -> Result<AttemptResult, ClientError>;

    /// Persists a watch-progress snapshot for a lesson.
    async fn update_progress(&self, snapshot: &ProgressSnapshot) -> Result<(), ClientError>;
}
