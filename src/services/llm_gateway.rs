// src/services/llm_gateway.rs
//! Chat and whiteboard orchestration on top of a [`Completion`] backend.

use std::sync::Arc;

use thiserror::Error;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use super::completion::Completion;
use super::prompt_builder::{build_drawing_prompt, build_system_prompt, build_user_message};
use super::shapes::{Shape, ShapeError, extract_json_array, validate};
use super::suggestions::suggest;
use crate::message::{ChatReply, ChatRequest, DrawReply, DrawRequest};

pub const DEFAULT_SUBJECT: &str = "General";

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("AI response could not be parsed as shapes JSON. Raw response: {raw}")]
    ShapeParse { raw: String },

    #[error("shape {index} is invalid: {source}")]
    InvalidShape {
        index: usize,
        #[source]
        source: ShapeError,
    },
}

#[derive(Clone)]
pub struct LlmGateway {
    completion: Arc<dyn Completion>,
}

impl LlmGateway {
    pub fn new(completion: Arc<dyn Completion>) -> Self {
        Self { completion }
    }

    /// Answer a tutoring question. Never fails: an unusable backend yields the demo-mode text.
    pub async fn answer_chat(&self, req: &ChatRequest) -> ChatReply {
        let span = info_span!("answer_chat", request_id = %Uuid::new_v4(), subject = ?req.subject);
        async {
            let system = build_system_prompt(req.subject.as_deref());
            let user = build_user_message(&req.message, req.context.as_deref());

            let response = match self.completion.complete(Some(&system), &user).await {
                Ok(text) if !text.is_empty() => text,
                Ok(_) => {
                    warn!("completion came back empty, answering in demo mode");
                    fallback_response(&req.message, req.subject.as_deref())
                }
                Err(e) => {
                    warn!(error = %e, "completion unavailable, answering in demo mode");
                    fallback_response(&req.message, req.subject.as_deref())
                }
            };

            ChatReply {
                response,
                subject: req
                    .subject
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
                latex_expressions: Vec::new(),
                suggestions: suggest(&req.message),
            }
        }
        .instrument(span)
        .await
    }

    /// Turn a drawing instruction into validated shapes, in drawing order.
    pub async fn draw_whiteboard(&self, req: &DrawRequest) -> Result<DrawReply, DrawError> {
        let span = info_span!("draw_whiteboard", request_id = %Uuid::new_v4());
        async {
            let prompt = build_drawing_prompt(&req.request, req.canvas_width, req.canvas_height);

            // No safe default drawing exists, and the fallback text echoes the
            // user's request, so it must never reach the extractor.
            let raw = match self.completion.complete(None, &prompt).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "completion unavailable for drawing request");
                    return Err(DrawError::ShapeParse {
                        raw: fallback_response(&req.request, None),
                    });
                }
            };

            let shapes = parse_shapes(&raw)?;
            info!(count = shapes.len(), "generated whiteboard shapes");

            Ok(DrawReply {
                shapes,
                description: format!("AI-generated drawing for: {}", req.request),
            })
        }
        .instrument(span)
        .await
    }
}

/// Extract the shape array from model output and validate every element.
pub fn parse_shapes(raw: &str) -> Result<Vec<Shape>, DrawError> {
    let items = extract_json_array(raw).ok_or_else(|| {
        warn!("model output holds no JSON array");
        DrawError::ShapeParse { raw: raw.to_string() }
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate(item).map_err(|source| DrawError::InvalidShape { index, source }))
        .collect()
}

pub fn fallback_response(message: &str, subject: Option<&str>) -> String {
    let topic = match subject {
        Some(s) if !s.trim().is_empty() => format!("your {s} question"),
        _ => "your question".to_string(),
    };
    format!(
        "I'm here to help you with {topic}: '{message}'. However, I'm currently in demo mode. \
         Please set up your OpenRouter API key to get full AI-powered responses."
    )
}
