use tutor_backend::message::{ChatReply, DrawReply, HealthReply};
use tutor_backend::routes::{cors_layer, create_router};
use tutor_backend::services::completion::{Completion, CompletionError};
use tutor_backend::state::AppState;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

struct Canned(&'static str);

#[async_trait]
impl Completion for Canned {
    async fn complete(&self, _: Option<&str>, _: &str) -> Result<String, CompletionError> {
        Ok(self.0.to_string())
    }
}

struct Offline;

#[async_trait]
impl Completion for Offline {
    async fn complete(&self, _: Option<&str>, _: &str) -> Result<String, CompletionError> {
        Err(CompletionError::MissingCredential)
    }
}

fn app(completion: impl Completion + 'static) -> Router {
    let state = Arc::new(AppState::new(Arc::new(completion)));
    create_router().with_state(state)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

#[tokio::test]
async fn test_chat_endpoint_degrades_when_backend_is_down() {
    let response = app(Offline)
        .oneshot(post_json("/api/chat", r#"{"message": "How do I integrate x^2?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply: ChatReply = body_json(response).await;
    assert!(reply.response.contains("demo mode"));
    assert!(reply.response.contains("How do I integrate x^2?"));
    assert_eq!(reply.subject, "General");
    assert!(reply.latex_expressions.is_empty());
    assert_eq!(reply.suggestions[0], "What integration technique should I use?");
}

#[tokio::test]
async fn test_chat_endpoint_returns_model_answer() {
    let response = app(Canned("Use the power rule: $2x$."))
        .oneshot(post_json(
            "/api/chat",
            r#"{"message": "derivative of x^2", "subject": "AP Calculus", "context": null}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply: ChatReply = body_json(response).await;
    assert_eq!(reply.response, "Use the power rule: $2x$.");
    assert_eq!(reply.subject, "AP Calculus");
    assert_eq!(reply.suggestions.len(), 3);
}

#[tokio::test]
async fn test_empty_chat_message_is_rejected() {
    let response = app(Offline)
        .oneshot(post_json("/api/chat", r#"{"message": ""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(response).await;
    assert_eq!(body["status_code"], 400);
}

#[tokio::test]
async fn test_whitespace_chat_message_still_degrades() {
    let response = app(Offline)
        .oneshot(post_json("/api/chat", r#"{"message": "   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply: ChatReply = body_json(response).await;
    assert!(reply.response.contains("demo mode"));
    assert_eq!(reply.subject, "General");
}

#[tokio::test]
async fn test_bad_request_bodies_get_the_error_envelope() {
    let cases = [
        ("/api/chat", r#"{"message": "#),
        ("/api/chat", r#"{"subject": "AP Physics"}"#),
        ("/api/chat", r#"{"message": 42}"#),
        ("/api/chat/stream", "not json"),
        ("/api/whiteboard/draw", r#"{"canvas_width": 800}"#),
        ("/api/whiteboard/draw", r#"{"request": "axes", "canvas_width": -1}"#),
    ];

    for (uri, body) in cases {
        let response = app(Offline).oneshot(post_json(uri, body)).await.unwrap();

        let status = response.status();
        assert!(status.is_client_error(), "{uri} {body}: got {status}");
        let envelope: Value = body_json(response).await;
        assert_eq!(envelope["status_code"], status.as_u16());
        assert!(!envelope["error"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_missing_content_type_is_415_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .body(Body::from(r#"{"message": "hi"}"#))
        .unwrap();
    let response = app(Offline).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: Value = body_json(response).await;
    assert_eq!(body["status_code"], 415);
}

#[tokio::test]
async fn test_stream_placeholder() {
    let response = app(Offline)
        .oneshot(post_json("/api/chat/stream", r#"{"message": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = body_json(response).await;
    assert_eq!(body["message"], "Streaming not implemented yet");
}

#[tokio::test]
async fn test_whiteboard_draw_extracts_shapes() {
    let model = r#"Sure! [{"type":"line","x1":0,"y1":0,"x2":10,"y2":10}]"#;
    let response = app(Canned(model))
        .oneshot(post_json("/api/whiteboard/draw", r#"{"request": "draw a diagonal"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply: DrawReply = body_json(response).await;
    assert_eq!(reply.shapes.len(), 1);
    assert_eq!(reply.shapes[0].x2, Some(10.0));
    assert_eq!(reply.description, "AI-generated drawing for: draw a diagonal");
}

#[tokio::test]
async fn test_whiteboard_unparseable_output_is_500_with_raw_text() {
    let response = app(Canned("I would rather describe it in words."))
        .oneshot(post_json("/api/whiteboard/draw", r#"{"request": "draw a cat"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = body_json(response).await;
    let detail = body["error"].as_str().unwrap();
    assert!(detail.contains("could not be parsed as shapes JSON"));
    assert!(detail.contains("I would rather describe it in words."));
}

#[tokio::test]
async fn test_whiteboard_unknown_shape_is_500() {
    let response = app(Canned(r#"[{"type":"star","left":1}]"#))
        .oneshot(post_json("/api/whiteboard/draw", r#"{"request": "draw a star"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("star"));
}

#[tokio::test]
async fn test_whiteboard_with_backend_down_ignores_arrays_in_request() {
    let response = app(Offline)
        .oneshot(post_json(
            "/api/whiteboard/draw",
            r#"{"request": "draw [{\"type\":\"circle\",\"radius\":5}]"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = body_json(response).await;
    let detail = body["error"].as_str().unwrap();
    assert!(detail.contains("could not be parsed as shapes JSON"));
    assert!(detail.contains("demo mode"));
    assert!(body.get("shapes").is_none());
}

#[tokio::test]
async fn test_whiteboard_rejects_empty_canvas() {
    let response = app(Canned("[]"))
        .oneshot(post_json(
            "/api/whiteboard/draw",
            r#"{"request": "anything", "canvas_width": 0, "canvas_height": 600}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_subject_routes() {
    let app = app(Offline);

    let response = app.clone().oneshot(get("/api/subjects")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let subjects: Value = body_json(response).await;
    assert_eq!(subjects.as_array().unwrap().len(), 4);

    let response = app.clone().oneshot(get("/api/subjects/AP%20Physics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let physics: Value = body_json(response).await;
    assert_eq!(physics["name"], "AP Physics");

    let response = app.clone().oneshot(get("/api/subjects/Astrology")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(get("/api/subjects/search?topic=equilibrium"))
        .await
        .unwrap();
    let found: Value = body_json(response).await;
    assert_eq!(found["subjects"], serde_json::json!(["AP Chemistry"]));

    let response = app.clone().oneshot(get("/api/subjects/search")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(response).await;
    assert_eq!(body["status_code"], 400);

    let response = app.oneshot(get("/api/subjects/stats")).await.unwrap();
    let stats: Value = body_json(response).await;
    assert_eq!(stats["AMC Math"]["topics_count"], 10);
}

#[tokio::test]
async fn test_related_topics_route() {
    let app = app(Offline);

    let response = app
        .clone()
        .oneshot(get("/api/subjects/AP%20Chemistry/related?topic=chemical%20kinetics%20and%20rates"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = body_json(response).await;
    assert_eq!(body["subject"], "AP Chemistry");
    assert_eq!(body["related"], serde_json::json!(["Chemical Kinetics"]));

    let response = app
        .clone()
        .oneshot(get("/api/subjects/Astrology/related?topic=stars"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(response).await;
    assert_eq!(body["error"], "Subject 'Astrology' not found");

    let response = app.oneshot(get("/api/subjects/AP%20Physics/related")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let response = app(Offline).oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let health: HealthReply = body_json(response).await;
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_cors_allows_configured_origin_only() {
    let app = app(Offline).layer(cors_layer(&["http://localhost:5173".to_string()]));

    let request = |origin: &str| {
        Request::builder()
            .uri("/health")
            .header("origin", origin)
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(request("http://localhost:5173")).await.unwrap();
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );

    let response = app.oneshot(request("http://evil.test")).await.unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());
}
