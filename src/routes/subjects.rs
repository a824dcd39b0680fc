use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    error::AppError,
    extract::ApiQuery,
    services::subject_service::{SubjectInfo, SubjectStats},
    state::SharedState,
};

#[derive(Deserialize)]
pub struct TopicQuery {
    pub topic: String,
}

pub async fn list_subjects_handler(State(state): State<SharedState>) -> Json<Vec<SubjectInfo>> {
    Json(state.subjects.all().to_vec())
}

pub async fn get_subject_handler(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<SubjectInfo>, AppError> {
    state
        .subjects
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Subject '{name}' not found")))
}

pub async fn search_subjects_handler(
    State(state): State<SharedState>,
    ApiQuery(query): ApiQuery<TopicQuery>,
) -> Json<Value> {
    let subjects = state.subjects.search_by_topic(&query.topic);
    Json(json!({ "topic": query.topic, "subjects": subjects }))
}

/// Topics of one subject that overlap the given topic.
pub async fn related_topics_handler(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    ApiQuery(query): ApiQuery<TopicQuery>,
) -> Result<Json<Value>, AppError> {
    if state.subjects.get(&name).is_none() {
        return Err(AppError::NotFound(format!("Subject '{name}' not found")));
    }
    let related = state.subjects.related_topics(&name, &query.topic);
    Ok(Json(json!({ "subject": name, "topic": query.topic, "related": related })))
}

pub async fn subject_stats_handler(
    State(state): State<SharedState>,
) -> Json<BTreeMap<&'static str, SubjectStats>> {
    Json(state.subjects.statistics())
}
