use axum::{Json, extract::State};
use tracing::info;

use crate::{
    error::AppError,
    extract::ApiJson,
    message::{ChatReply, ChatRequest, StreamReply},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    // Whitespace-only questions are still answered.
    if payload.message.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    info!(
        subject = ?payload.subject,
        has_context = payload.context.is_some(),
        "chat request"
    );

    Ok(Json(state.gateway.answer_chat(&payload).await))
}

// Placeholder until token streaming exists.
pub async fn chat_stream_handler(
    ApiJson(_payload): ApiJson<ChatRequest>,
) -> Json<StreamReply> {
    Json(StreamReply {
        message: "Streaming not implemented yet".to_string(),
    })
}
