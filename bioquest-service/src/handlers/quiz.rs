use crate::models::{ChatMessage, QuizRequest, QuizResponse};
use crate::prompts::{quiz_prompt, CREATIVE_TEMPERATURE};
use crate::services::providers::{CompletionParams, ProviderError};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Model reply is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// The trimmed reply is parsed as JSON and kept as-is. Surrounding prose or
/// code fences make it a parse failure.
pub fn parse_quiz(reply: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(reply.trim())
}

async fn build_quiz(state: &AppState, topic: &str) -> Result<Value, QuizError> {
    let messages = vec![ChatMessage::user(quiz_prompt(topic))];
    let reply = state
        .chat_provider
        .complete(
            &messages,
            &CompletionParams::with_temperature(CREATIVE_TEMPERATURE),
        )
        .await?;

    Ok(parse_quiz(&reply)?)
}

/// `POST /quiz`: three multiple-choice questions on `topic` (default biology).
///
/// A missing or unreadable body is treated as `{}`.
pub async fn generate_quiz(
    State(state): State<AppState>,
    payload: Option<Json<QuizRequest>>,
) -> Result<Json<QuizResponse>, QuizError> {
    let Json(request) = payload.unwrap_or_default();

    match build_quiz(&state, &request.topic).await {
        Ok(questions) => Ok(Json(QuizResponse { questions })),
        Err(e) => {
            tracing::error!(topic = %request.topic, error = %e, "Quiz generation failed");
            Err(e)
        }
    }
}
