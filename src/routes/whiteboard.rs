use axum::{Json, extract::State};
use tracing::info;

use crate::{
    error::AppError,
    extract::ApiJson,
    message::{DrawReply, DrawRequest},
    state::SharedState,
};

pub async fn draw_handler(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<DrawRequest>,
) -> Result<Json<DrawReply>, AppError> {
    if payload.canvas_width == 0 || payload.canvas_height == 0 {
        return Err(AppError::BadRequest(
            "Canvas dimensions must be positive".to_string(),
        ));
    }

    info!(request = %payload.request, "whiteboard request");

    let reply = state.gateway.draw_whiteboard(&payload).await?;
    Ok(Json(reply))
}
