// src/attempt.rs

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    api::LmsApi,
    error::ClientError,
    models::{
        attempt::{AnswerReceipt, AnswerSelection, AttemptResult, StartedAttempt},
        quiz::{Quiz, QuizQuestion},
    },
};

/// Client-side lifecycle of one attempt. There is no pause or cancel;
/// navigating away simply drops the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    NotStarted,
    InProgress,
    Finished,
}

/// Drives a single quiz attempt from start to finish.
///
/// The controller exclusively owns the attempt's in-memory state: the
/// question pointer, the per-question answer selections, and the countdown.
/// All scoring is server-side; the controller only displays what the finish
/// call returns.
pub struct AttemptController {
    api: Arc<dyn LmsApi>,
    quiz: Quiz,
    state: AttemptState,
    attempt: Option<StartedAttempt>,

    /// Latest local selection per question id. Radio-button semantics: a
    /// later selection overwrites the earlier one.
    selections: HashMap<String, AnswerSelection>,

    /// Last selection acknowledged by the server, per question id. A
    /// question is "pending" while its local selection differs from this.
    submitted: HashMap<String, AnswerSelection>,

    current: usize,
    remaining_seconds: Option<u32>,
    result: Option<AttemptResult>,

    /// Guards against duplicate finalize calls (double-clicked finish,
    /// timeout firing during a manual finish).
    finishing: bool,
}

impl AttemptController {
    pub fn new(api: Arc<dyn LmsApi>, quiz: Quiz) -> Self {
        Self {
            api,
            quiz,
            state: AttemptState::NotStarted,
            attempt: None,
            selections: HashMap::new(),
            submitted: HashMap::new(),
            current: 0,
            remaining_seconds: None,
            result: None,
            finishing: false,
        }
    }

    /// Fetches the quiz (questions included, once per attempt) and builds a
    /// controller for it.
    pub async fn load(api: Arc<dyn LmsApi>, quiz_id: &str) -> Result<Self, ClientError> {
        let quiz = api.quiz(quiz_id).await?;
        Ok(Self::new(api, quiz))
    }

    /// Starts a new attempt.
    ///
    /// Preconditions are checked before the creation mutation is issued:
    /// the quiz must be published and the user must be below the quiz's
    /// attempt limit (0 means unlimited). On success the controller enters
    /// `InProgress` with the question pointer on the first question and the
    /// countdown armed from the time limit, if any. On failure the
    /// controller stays in `NotStarted`.
    pub async fn start(&mut self) -> Result<(), ClientError> {
        if self.state != AttemptState::NotStarted {
            return Err(ClientError::InvalidState(
                "attempt already started".to_string(),
            ));
        }
        if !self.quiz.published {
            return Err(ClientError::Precondition(
                "quiz is not published".to_string(),
            ));
        }

        let prior = self.api.my_attempts(&self.quiz.id).await?;
        if self.quiz.max_attempts > 0 && prior.len() as u32 >= self.quiz.max_attempts {
            return Err(ClientError::Precondition(format!(
                "attempt limit reached ({} of {})",
                prior.len(),
                self.quiz.max_attempts
            )));
        }

        let started = self.api.start_attempt(&self.quiz.id).await?;
        tracing::info!(
            "started attempt {} (#{}) on quiz {}",
            started.attempt_id,
            started.attempt_number,
            self.quiz.id
        );

        // Server-confirmed limit wins over the quiz's configured one.
        self.remaining_seconds = started
            .time_limit_minutes
            .or(self.quiz.time_limit_minutes)
            .map(|minutes| minutes * 60);
        self.attempt = Some(started);
        self.current = 0;
        self.selections.clear();
        self.submitted.clear();
        self.result = None;
        self.state = AttemptState::InProgress;

        Ok(())
    }

    /// Records the user's selection for a question. Pure local mutation,
    /// no network call; overwrites any prior selection for that question.
    pub fn select_answer(
        &mut self,
        question_id: &str,
        selection: AnswerSelection,
    ) -> Result<(), ClientError> {
        self.ensure_in_progress()?;

        if !self.quiz.questions.iter().any(|q| q.id == question_id) {
            return Err(ClientError::NotFound(format!(
                "question {} is not part of quiz {}",
                question_id, self.quiz.id
            )));
        }

        self.selections.insert(question_id.to_string(), selection);
        Ok(())
    }

    /// Moves to the next question, submitting the current question's
    /// pending selection first. A submit failure aborts the move so the
    /// user can retry; advancing past an unanswered question is allowed.
    pub async fn advance(&mut self) -> Result<(), ClientError> {
        self.ensure_in_progress()?;

        self.submit_current_answer().await?;

        if self.current + 1 < self.quiz.questions.len() {
            self.current += 1;
        }
        Ok(())
    }

    /// Moves back one question. Never submits anything.
    pub fn retreat(&mut self) -> Result<(), ClientError> {
        self.ensure_in_progress()?;
        self.current = self.current.saturating_sub(1);
        Ok(())
    }

    /// Submits the current question's pending selection, if any. Returns
    /// `None` when there is nothing pending. On failure the local selection
    /// is preserved so the user may retry; there is no automatic retry.
    pub async fn submit_current_answer(&mut self) -> Result<Option<AnswerReceipt>, ClientError> {
        self.ensure_in_progress()?;

        let Some((question_id, selection)) = self.pending_selection() else {
            return Ok(None);
        };

        let attempt_id = self.attempt_id()?;
        let receipt = self
            .api
            .submit_answer(&attempt_id, &question_id, &selection)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "failed to submit answer for question {}: {}",
                    question_id,
                    e
                );
            })?;

        self.submitted.insert(question_id, selection);
        Ok(Some(receipt))
    }

    /// Finalizes the attempt.
    ///
    /// The current question's pending selection is submitted first on a
    /// best-effort basis: once time is up the user must not be left stuck,
    /// so a submit failure is logged and finalization proceeds. On a
    /// finalize failure the countdown stays cleared (it is never
    /// resurrected) and the call may be retried.
    pub async fn finish(&mut self) -> Result<&AttemptResult, ClientError> {
        self.ensure_in_progress()?;

        if self.finishing {
            return Err(ClientError::InvalidState(
                "finalization already in flight".to_string(),
            ));
        }
        self.finishing = true;

        let attempt_id = self.attempt_id()?;

        if let Some((question_id, selection)) = self.pending_selection() {
            match self
                .api
                .submit_answer(&attempt_id, &question_id, &selection)
                .await
            {
                Ok(_) => {
                    self.submitted.insert(question_id, selection);
                }
                Err(e) => {
                    tracing::warn!(
                        "final submission for question {} failed, finishing anyway: {}",
                        question_id,
                        e
                    );
                }
            }
        }

        self.remaining_seconds = None;

        match self.api.finish_attempt(&attempt_id).await {
            Ok(result) => {
                self.state = AttemptState::Finished;
                tracing::info!(
                    "attempt {} finished: {} ({})",
                    attempt_id,
                    result.summary_percent(),
                    if result.passed { "passed" } else { "failed" }
                );
                Ok(self.result.insert(result))
            }
            Err(e) => {
                tracing::error!("failed to finalize attempt {}: {}", attempt_id, e);
                self.finishing = false;
                Err(e)
            }
        }
    }

    /// One countdown step, driven once per second by the view layer's
    /// ticker. Only decrements while in progress with a time limit; on
    /// reaching zero, finalizes exactly once. The countdown slot is cleared
    /// before finalizing, so a failed forced finish cannot re-arm it, and
    /// ticks arriving after `Finished` are ignored.
    pub async fn tick(&mut self) -> Result<(), ClientError> {
        if self.state != AttemptState::InProgress {
            return Ok(());
        }
        let Some(remaining) = self.remaining_seconds else {
            return Ok(());
        };

        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.remaining_seconds = None;
            tracing::info!("time limit reached, finalizing attempt");
            self.finish().await?;
        } else {
            self.remaining_seconds = Some(remaining);
        }
        Ok(())
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Zero-based question pointer.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.quiz.questions.get(self.current)
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.remaining_seconds
    }

    pub fn attempt_number(&self) -> Option<u32> {
        self.attempt.as_ref().map(|a| a.attempt_number)
    }

    pub fn selection(&self, question_id: &str) -> Option<&AnswerSelection> {
        self.selections.get(question_id)
    }

    /// Final scoring, present once the attempt has finished.
    pub fn result(&self) -> Option<&AttemptResult> {
        self.result.as_ref()
    }

    fn ensure_in_progress(&self) -> Result<(), ClientError> {
        match self.state {
            AttemptState::InProgress => Ok(()),
            AttemptState::NotStarted => Err(ClientError::InvalidState(
                "attempt has not been started".to_string(),
            )),
            AttemptState::Finished => Err(ClientError::InvalidState(
                "attempt is already finished".to_string(),
            )),
        }
    }

    fn attempt_id(&self) -> Result<String, ClientError> {
        self.attempt
            .as_ref()
            .map(|a| a.attempt_id.clone())
            .ok_or_else(|| ClientError::InvalidState("no active attempt".to_string()))
    }

    /// The current question's selection, when it has not been submitted yet
    /// or has changed since the last acknowledged submission.
    fn pending_selection(&self) -> Option<(String, AnswerSelection)> {
        let question = self.quiz.questions.get(self.current)?;
        let selection = self.selections.get(&question.id)?;
        if self.submitted.get(&question.id) == Some(selection) {
            return None;
        }
        Some((question.id.clone(), selection.clone()))
    }
}
