// src/main.rs

use std::sync::Arc;

use lms_client::api::{HttpApi, LmsApi, Session};
use lms_client::config::Config;
use lms_client::models::attempt::AttemptHistory;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Read-only smoke client: fetches a quiz and the caller's attempt history
/// and logs a summary. Useful for verifying connectivity and credentials
/// against a deployed LMS.
#[tokio::main]
async fn main() {
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let quiz_id = match std::env::args().nth(1) {
        Some(id) => id,
        None => {
            tracing::error!("usage: lms-client <quiz-id>");
            std::process::exit(2);
        }
    };

    let session = match &config.api_token {
        Some(token) => Session::authenticated(token.as_str()),
        None => Session::anonymous(),
    };

    let api = match HttpApi::new(&config.api_base_url, session) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            tracing::error!("invalid API configuration: {}", e);
            std::process::exit(1);
        }
    };

    let quiz = match api.quiz(&quiz_id).await {
        Ok(quiz) => quiz,
        Err(e) => {
            tracing::error!("failed to fetch quiz {}: {}", quiz_id, e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "quiz '{}': {} questions, time limit {:?} min, passing score {}%, max attempts {}",
        quiz.title,
        quiz.questions.len(),
        quiz.time_limit_minutes,
        quiz.passing_score,
        quiz.max_attempts
    );

    match api.my_attempts(&quiz_id).await {
        Ok(attempts) => {
            let history = AttemptHistory::summarize(&attempts);
            tracing::info!(
                "{} prior attempt(s), best {:?}%, passed: {}",
                history.count,
                history.best_percentage,
                history.passed
            );
        }
        Err(e) => {
            tracing::warn!("could not fetch attempt history: {}", e);
        }
    }
}
