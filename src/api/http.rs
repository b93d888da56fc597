// src/api/http.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, header};
use serde::Serialize;
use url::Url;
use validator::Validate;

use crate::{
    error::ClientError,
    models::{
        attempt::{AnswerReceipt, AnswerSelection, AttemptResult, QuizAttempt, StartedAttempt},
        progress::ProgressSnapshot,
        quiz::Quiz,
    },
};

use super::{LmsApi, Session};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Body of the answer-submission request.
#[derive(Debug, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
struct SubmitAnswerBody {
    question_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    answer_id: Option<String>,

    #[validate(length(min = 1, max = 2000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    answer_text: Option<String>,
}

/// Body of the progress-update request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProgressBody {
    watched_seconds: f64,
    progress_percent: f64,
    completed: bool,
}

/// HTTP implementation of [`LmsApi`] against the LMS's JSON endpoints.
pub struct HttpApi {
    client: reqwest::Client,
    base: Url,
    session: Session,
}

impl HttpApi {
    pub fn new(base_url: &str, session: Session) -> Result<Self, ClientError> {
        let base = Url::parse(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base,
            session,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path)?)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.bearer() {
            Some(bearer) => req.header(header::AUTHORIZATION, bearer),
            None => req,
        }
    }

    /// Maps non-success responses to `ClientError`, reading the server's
    /// `{"error": "..."}` body for the message where available.
    async fn check(resp: Response) -> Result<Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let message = Self::error_message(resp).await;
        if status == StatusCode::BAD_REQUEST {
            Err(ClientError::BadRequest(message))
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(ClientError::AuthError(message))
        } else if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound(message))
        } else {
            Err(ClientError::Remote(message))
        }
    }

    async fn error_message(resp: Response) -> String {
        let status = resp.status();
        match resp.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("error")
                .and_then(|value| value.as_str())
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| status.to_string()),
            Err(_) => status.to_string(),
        }
    }
}

#[async_trait]
impl LmsApi for HttpApi {
    async fn quiz(&self, quiz_id: &str) -> Result<Quiz, ClientError> {
        let url = self.endpoint(&format!("api/quizzes/{}", quiz_id))?;
        let resp = self.authorize(self.client.get(url)).send().await?;

        Ok(Self::check(resp).await?.json().await?)
    }

    async fn my_attempts(&self, quiz_id: &str) -> Result<Vec<QuizAttempt>, ClientError> {
        let url = self.endpoint(&format!("api/quizzes/{}/attempts/mine", quiz_id))?;
        let resp = self.authorize(self.client.get(url)).send().await?;

        Ok(Self::check(resp).await?.json().await?)
    }

    async fn start_attempt(&self, quiz_id: &str) -> Result<StartedAttempt, ClientError> {
        let url = self.endpoint(&format!("api/quizzes/{}/attempts", quiz_id))?;
        let resp = self.authorize(self.client.post(url)).send().await?;

        Ok(Self::check(resp).await?.json().await?)
    }

    async fn submit_answer(
        &self,
        attempt_id: &str,
        question_id: &str,
        selection: &AnswerSelection,
    ) -> Result<AnswerReceipt, ClientError> {
        let body = match selection {
            AnswerSelection::Choice(answer_id) => SubmitAnswerBody {
                question_id: question_id.to_string(),
                answer_id: Some(answer_id.clone()),
                answer_text: None,
            },
            AnswerSelection::Text(text) => SubmitAnswerBody {
                question_id: question_id.to_string(),
                answer_id: None,
                answer_text: Some(text.clone()),
            },
        };
        body.validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;

        let url = self.endpoint(&format!("api/attempts/{}/answers", attempt_id))?;
        let resp = self
            .authorize(self.client.post(url))
            .json(&body)
            .send()
            .await?;

        Ok(Self::check(resp).await?.json().await?)
    }

    async fn finish_attempt(&self, attempt_id: &str) -> Result<AttemptResult, ClientError> {
        let url = self.endpoint(&format!("api/attempts/{}/finish", attempt_id))?;
        let resp = self.authorize(self.client.post(url)).send().await?;

        Ok(Self::check(resp).await?.json().await?)
    }

    async fn update_progress(&self, snapshot: &ProgressSnapshot) -> Result<(), ClientError> {
        let body = UpdateProgressBody {
            watched_seconds: snapshot.watched_seconds,
            progress_percent: snapshot.progress_percent,
            completed: snapshot.completed,
        };

        let url = self.endpoint(&format!("api/lessons/{}/progress", snapshot.lesson_id))?;
        let resp = self
            .authorize(self.client.put(url))
            .json(&body)
            .send()
            .await?;

        Self::check(resp).await?;
        Ok(())
    }
}
