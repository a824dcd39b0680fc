// src/message.rs
use serde::{Deserialize, Serialize};

use crate::services::shapes::Shape;

pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

#[derive(Clone, Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub subject: String,
    pub latex_expressions: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DrawRequest {
    pub request: String,
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
}

fn default_canvas_width() -> u32 {
    DEFAULT_CANVAS_WIDTH
}

fn default_canvas_height() -> u32 {
    DEFAULT_CANVAS_HEIGHT
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrawReply {
    pub shapes: Vec<Shape>,
    pub description: String,
}

#[derive(Serialize, Deserialize)]
pub struct StreamReply {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct HealthReply {
    pub status: String,
    pub message: String,
}
