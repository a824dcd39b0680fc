// src/services/prompt_builder.rs
use super::subject_service::catalog;

pub const BASE_SYSTEM_PROMPT: &str = "You are an expert AI tutor specializing in AP Math and Science.\n\
Provide clear, step-by-step explanations with mathematical expressions in LaTeX format.\n\
Always show your work and explain the reasoning behind each step.\n\
Use proper mathematical notation and include units where applicable.";

/// Tutoring persona, with a topic block appended for known subjects.
///
/// Unknown or missing subjects leave the base prompt untouched.
pub fn build_system_prompt(subject: Option<&str>) -> String {
    let mut prompt = BASE_SYSTEM_PROMPT.to_string();

    if let Some(info) = subject.and_then(|s| catalog().get(s.trim())) {
        prompt.push_str("\n\nSubject focus: ");
        prompt.push_str(&info.name);
        prompt.push_str("\nKey topics: ");
        prompt.push_str(&info.topics.join(", "));
    }

    prompt
}

/// Context goes first, then the question. The model is sensitive to this order.
pub fn build_user_message(message: &str, context: Option<&str>) -> String {
    match context {
        Some(ctx) if !ctx.is_empty() => format!("Context: {ctx}\n\nQuestion: {message}"),
        _ => message.to_string(),
    }
}

pub fn build_drawing_prompt(request: &str, canvas_width: u32, canvas_height: u32) -> String {
    format!(
        r##"You are an AI whiteboard assistant. Given a user's request, output a JSON array of shapes to draw on a whiteboard canvas.
Each shape should be an object with a type (one of: line, rectangle, circle, text), and relevant properties:
- line: x1, y1, x2, y2, stroke, strokeWidth
- rectangle: left, top, width, height, fill, stroke, strokeWidth
- circle: left, top, radius, fill, stroke, strokeWidth
- text: left, top, text, fontSize, fill

Canvas size: {canvas_width}x{canvas_height}

Example:
[
  {{"type": "line", "x1": 50, "y1": 300, "x2": 750, "y2": 300, "stroke": "#000000", "strokeWidth": 2}},
  {{"type": "text", "left": 760, "top": 295, "text": "x", "fontSize": 20, "fill": "#000000"}}
]

User request: {request}

Respond ONLY with the JSON array, no explanation or extra text."##
    )
}
