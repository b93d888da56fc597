// tests/common/mod.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use lms_client::api::LmsApi;
use lms_client::error::ClientError;
use lms_client::models::{
    attempt::{
        AnswerReceipt, AnswerSelection, AttemptResult, AttemptStatus, QuizAttempt, StartedAttempt,
    },
    progress::ProgressSnapshot,
    quiz::{AnswerOption, QuestionType, Quiz, QuizQuestion},
};
use lms_client::utils::clock::Clock;

/// Mutable server-side state of the fake, behind one lock so tests can
/// inspect everything the client sent.
#[derive(Default)]
pub struct FakeState {
    pub attempts: Vec<QuizAttempt>,
    pub start_calls: u32,
    pub finish_calls: u32,
    /// Ordered submission log: (question_id, selection).
    pub submissions: Vec<(String, AnswerSelection)>,
    pub snapshots: Vec<ProgressSnapshot>,

    pub fail_submit: bool,
    pub fail_finish: bool,
    pub fail_progress: bool,
}

/// In-memory [`LmsApi`] standing in for the remote server.
pub struct FakeApi {
    pub quiz: Quiz,
    pub state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new(quiz: Quiz) -> Arc<Self> {
        Arc::new(Self {
            quiz,
            state: Mutex::new(FakeState::default()),
        })
    }

    pub fn with_prior_attempts(quiz: Quiz, count: u32) -> Arc<Self> {
        let api = Self::new(quiz);
        {
            let mut state = api.state.lock().unwrap();
            for n in 1..=count {
                let quiz_id = api.quiz.id.clone();
                state.attempts.push(finished_attempt(&quiz_id, n, 50.0, false));
            }
        }
        api
    }
}

#[async_trait]
impl LmsApi for FakeApi {
    async fn quiz(&self, quiz_id: &str) -> Result<Quiz, ClientError> {
        if quiz_id == self.quiz.id {
            Ok(self.quiz.clone())
        } else {
            Err(ClientError::NotFound(format!("quiz {}", quiz_id)))
        }
    }

    async fn my_attempts(&self, _quiz_id: &str) -> Result<Vec<QuizAttempt>, ClientError> {
        Ok(self.state.lock().unwrap().attempts.clone())
    }

    async fn start_attempt(&self, quiz_id: &str) -> Result<StartedAttempt, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.start_calls += 1;

        let attempt_number = state.attempts.len() as u32 + 1;
        let started_at = Utc::now();
        let attempt_id = format!("attempt-{}", attempt_number);

        state.attempts.push(QuizAttempt {
            id: attempt_id.clone(),
            quiz_id: quiz_id.to_string(),
            attempt_number,
            started_at,
            ended_at: None,
            status: AttemptStatus::InProgress,
            total_score: None,
            max_score: None,
            percentage: None,
            passed: None,
        });

        Ok(StartedAttempt {
            attempt_id,
            attempt_number,
            started_at,
            time_limit_minutes: self.quiz.time_limit_minutes,
        })
    }

    async fn submit_answer(
        &self,
        _attempt_id: &str,
        question_id: &str,
        selection: &AnswerSelection,
    ) -> Result<AnswerReceipt, ClientError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_submit {
            return Err(ClientError::Remote("connection reset".to_string()));
        }

        state
            .submissions
            .push((question_id.to_string(), selection.clone()));

        Ok(AnswerReceipt {
            accepted: true,
            is_correct: None,
            points_awarded: None,
        })
    }

    async fn finish_attempt(&self, _attempt_id: &str) -> Result<AttemptResult, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.finish_calls += 1;
        if state.fail_finish {
            return Err(ClientError::Remote("connection reset".to_string()));
        }

        Ok(AttemptResult {
            total_score: 8.0,
            max_score: 10.0,
            percentage: 80.0,
            passed: true,
            ended_at: Utc::now(),
        })
    }

    async fn update_progress(&self, snapshot: &ProgressSnapshot) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_progress {
            return Err(ClientError::Remote("connection reset".to_string()));
        }
        state.snapshots.push(snapshot.clone());
        Ok(())
    }
}

/// Manually advanced wall clock for throttle tests.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Utc::now()),
        })
    }

    pub fn advance_millis(&self, millis: i64) {
        let mut now = self.now.lock().unwrap();
        *now += Duration::milliseconds(millis);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance_millis(secs * 1000);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// A published three-question quiz without a time limit.
pub fn sample_quiz() -> Quiz {
    Quiz {
        id: format!("quiz-{}", uuid::Uuid::new_v4()),
        title: "Ownership and Borrowing".to_string(),
        published: true,
        time_limit_minutes: None,
        passing_score: 60.0,
        max_attempts: 0,
        questions: vec![
            QuizQuestion {
                id: "q1".to_string(),
                text: "Which keyword moves a value?".to_string(),
                question_type: QuestionType::MultipleChoice,
                points: 4.0,
                options: vec![
                    AnswerOption {
                        id: "q1-a".to_string(),
                        text: "let".to_string(),
                    },
                    AnswerOption {
                        id: "q1-b".to_string(),
                        text: "move".to_string(),
                    },
                    AnswerOption {
                        id: "q1-c".to_string(),
                        text: "ref".to_string(),
                    },
                ],
            },
            QuizQuestion {
                id: "q2".to_string(),
                text: "A value can have two mutable borrows at once.".to_string(),
                question_type: QuestionType::TrueFalse,
                points: 2.0,
                options: vec![
                    AnswerOption {
                        id: "q2-true".to_string(),
                        text: "True".to_string(),
                    },
                    AnswerOption {
                        id: "q2-false".to_string(),
                        text: "False".to_string(),
                    },
                ],
            },
            QuizQuestion {
                id: "q3".to_string(),
                text: "Name the trait for cheap bitwise copies.".to_string(),
                question_type: QuestionType::ShortAnswer,
                points: 4.0,
                options: vec![],
            },
        ],
    }
}

pub fn finished_attempt(
    quiz_id: &str,
    attempt_number: u32,
    percentage: f64,
    passed: bool,
) -> QuizAttempt {
    let started_at = Utc::now() - Duration::minutes(30);
    QuizAttempt {
        id: format!("attempt-{}", attempt_number),
        quiz_id: quiz_id.to_string(),
        attempt_number,
        started_at,
        ended_at: Some(started_at + Duration::minutes(10)),
        status: AttemptStatus::Finished,
        total_score: Some(percentage / 10.0),
        max_score: Some(10.0),
        percentage: Some(percentage),
        passed: Some(passed),
    }
}
