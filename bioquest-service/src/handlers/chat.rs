use crate::history::{build_conversation, most_recent, parse_history};
use crate::models::{ChatMessage, ChatReply, ChatRequest, TeacherChatRequest};
use crate::prompts::{CREATIVE_TEMPERATURE, STUDENT_SYSTEM_PROMPT, TEACHER_SYSTEM_PROMPT};
use crate::services::providers::{CompletionParams, ProviderError};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// How a chat endpoint reports a failed completion. The reply body keeps the
/// same `{"reply": ...}` shape either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFailure {
    /// 200, error text as the reply. Used by the student chat, whose client
    /// renders whatever comes back.
    Inline { prefix: &'static str },
    /// 500, error text as the reply.
    ServerError { prefix: &'static str },
}

impl ReplyFailure {
    fn respond(self, err: &ProviderError) -> (StatusCode, Json<ChatReply>) {
        let (status, prefix) = match self {
            ReplyFailure::Inline { prefix } => (StatusCode::OK, prefix),
            ReplyFailure::ServerError { prefix } => (StatusCode::INTERNAL_SERVER_ERROR, prefix),
        };

        (
            status,
            Json(ChatReply {
                reply: format!("{}{}", prefix, err),
            }),
        )
    }
}

pub const STUDENT_FAILURE: ReplyFailure = ReplyFailure::Inline { prefix: "Error: " };

pub const TEACHER_FAILURE: ReplyFailure = ReplyFailure::ServerError {
    prefix: "Error occurred in lesson generation: ",
};

async fn reply_to(
    state: &AppState,
    endpoint: &'static str,
    messages: Vec<ChatMessage>,
    params: CompletionParams,
    on_failure: ReplyFailure,
) -> (StatusCode, Json<ChatReply>) {
    match state.chat_provider.complete(&messages, &params).await {
        Ok(reply) => (StatusCode::OK, Json(ChatReply { reply })),
        Err(e) => {
            tracing::error!(endpoint, error = %e, "Chat completion failed");
            on_failure.respond(&e)
        }
    }
}

/// `POST /chat`: tutoring conversation with structured history.
pub async fn student_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> (StatusCode, Json<ChatReply>) {
    let history = most_recent(&request.history, state.config.chat.history_limit).to_vec();
    let messages = build_conversation(STUDENT_SYSTEM_PROMPT, history, &request.message);

    reply_to(
        &state,
        "chat",
        messages,
        CompletionParams::default(),
        STUDENT_FAILURE,
    )
    .await
}

/// `POST /teacher-chat`: lesson planning with `"role: content"` history.
pub async fn teacher_chat(
    State(state): State<AppState>,
    Json(request): Json<TeacherChatRequest>,
) -> (StatusCode, Json<ChatReply>) {
    let history = parse_history(&request.history, state.config.chat.history_limit);
    let messages = build_conversation(TEACHER_SYSTEM_PROMPT, history, &request.message);

    reply_to(
        &state,
        "teacher-chat",
        messages,
        CompletionParams::with_temperature(CREATIVE_TEMPERATURE),
        TEACHER_FAILURE,
    )
    .await
}
