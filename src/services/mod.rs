pub mod completion;
pub mod llm_gateway;
pub mod prompt_builder;
pub mod shapes;
pub mod subject_service;
pub mod suggestions;
