// src/state.rs
use std::sync::Arc;

use crate::services::completion::Completion;
use crate::services::llm_gateway::LlmGateway;
use crate::services::subject_service::{SubjectCatalog, catalog};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub gateway: LlmGateway,
    pub subjects: &'static SubjectCatalog,
}

impl AppState {
    pub fn new(completion: Arc<dyn Completion>) -> Self {
        Self {
            gateway: LlmGateway::new(completion),
            subjects: catalog(),
        }
    }
}
