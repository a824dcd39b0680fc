// src/services/shapes.rs
//! Whiteboard shapes: validation of loose model JSON and array extraction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
    Text,
}

impl ShapeKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "line" => Some(Self::Line),
            "rectangle" => Some(Self::Rectangle),
            "circle" => Some(Self::Circle),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

/// One drawable primitive. Absent fields mean "not specified", not zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            left: None,
            top: None,
            width: None,
            height: None,
            radius: None,
            x1: None,
            y1: None,
            x2: None,
            y2: None,
            text: None,
            font_size: None,
            fill: None,
            stroke: None,
            stroke_width: None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("shape must be a JSON object, got {0}")]
    NotAnObject(String),

    #[error("shape is missing its 'type'")]
    MissingKind,

    #[error("unknown shape type '{0}' (expected line, rectangle, circle or text)")]
    UnknownShapeKind(String),

    #[error("field '{field}' has an unusable value: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Validate one loosely-typed JSON shape.
///
/// Numeric fields accept numbers or numeric strings; `null` counts as absent.
/// Unrecognised keys are ignored.
pub fn validate(raw: &Value) -> Result<Shape, ShapeError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| ShapeError::NotAnObject(json_type_name(raw).to_string()))?;

    let kind = match obj.get("type") {
        None | Some(Value::Null) => return Err(ShapeError::MissingKind),
        Some(Value::String(s)) => {
            ShapeKind::parse(s).ok_or_else(|| ShapeError::UnknownShapeKind(s.clone()))?
        }
        Some(other) => return Err(ShapeError::UnknownShapeKind(other.to_string())),
    };

    Ok(Shape {
        kind,
        left: number(obj, "left")?,
        top: number(obj, "top")?,
        width: number(obj, "width")?,
        height: number(obj, "height")?,
        radius: number(obj, "radius")?,
        x1: number(obj, "x1")?,
        y1: number(obj, "y1")?,
        x2: number(obj, "x2")?,
        y2: number(obj, "y2")?,
        text: string(obj, "text")?,
        font_size: number(obj, "fontSize")?,
        fill: string(obj, "fill")?,
        stroke: string(obj, "stroke")?,
        stroke_width: number(obj, "strokeWidth")?,
    })
}

fn number(obj: &Map<String, Value>, field: &'static str) -> Result<Option<f64>, ShapeError> {
    let invalid = |v: &Value| ShapeError::InvalidField { field, value: v.to_string() };
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(invalid(&obj[field])),
        },
        Some(v) => Err(invalid(v)),
    }
}

fn string(obj: &Map<String, Value>, field: &'static str) -> Result<Option<String>, ShapeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(v) => Err(ShapeError::InvalidField { field, value: v.to_string() }),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Locate the first top-level JSON array in free-form model output.
///
/// Each `[` is tried in order against its balanced `]` (string-aware); the
/// first candidate that parses as an array wins. Failing that, the span from
/// the leftmost `[` to the rightmost `]`, then the whole text, are tried.
pub fn extract_json_array(text: &str) -> Option<Vec<Value>> {
    for (start, _) in text.match_indices('[') {
        if let Some(end) = balanced_end(&text[start..]) {
            if let Ok(Value::Array(items)) = serde_json::from_str(&text[start..start + end]) {
                return Some(items);
            }
        }
    }

    if let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) {
        if start < end {
            if let Ok(Value::Array(items)) = serde_json::from_str(&text[start..=end]) {
                return Some(items);
            }
        }
    }

    match serde_json::from_str(text.trim()) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

/// Byte length of the bracketed span starting at `s[0] == '['`, if it closes.
fn balanced_end(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
