// src/routes/mod.rs
pub mod chat;
pub mod subjects;
pub mod whiteboard;

use crate::error::panic_response;
use crate::message::HealthReply;
use crate::state::SharedState;
use axum::{
    Json, Router,
    http::HeaderValue,
    routing::{get, post},
};
use chat::{chat_handler, chat_stream_handler};
use serde_json::{Value, json};
use subjects::{
    get_subject_handler, list_subjects_handler, related_topics_handler, search_subjects_handler,
    subject_stats_handler,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use whiteboard::draw_handler;

pub fn create_router() -> Router<SharedState> {
    let api_routes = Router::new()
        .route("/chat", post(chat_handler))
        .route("/chat/stream", post(chat_stream_handler))
        .route("/whiteboard/draw", post(draw_handler))
        .route("/subjects", get(list_subjects_handler))
        .route("/subjects/search", get(search_subjects_handler))
        .route("/subjects/stats", get(subject_stats_handler))
        .route("/subjects/{name}", get(get_subject_handler))
        .route("/subjects/{name}/related", get(related_topics_handler));

    Router::new()
        .nest("/api", api_routes)
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the configured origins; `*` anywhere in the list allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn health_handler() -> Json<HealthReply> {
    Json(HealthReply {
        status: "healthy".to_string(),
        message: "AI Study Assistant is running".to_string(),
    })
}
