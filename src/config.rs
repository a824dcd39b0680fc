// src/config.rs
//! Process settings, read once from the environment at start-up.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat-v3:free";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:5173,http://localhost:3000,http://127.0.0.1:5173,http://127.0.0.1:3000";
pub const DEFAULT_COMPUTE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a number, got '{value}'")]
    NotANumber { key: &'static str, value: String },

    #[error("TEMPERATURE must be between 0.0 and 2.0, got {0}")]
    TemperatureOutOfRange(f32),
}

/// Immutable settings shared by the whole process.
#[derive(Clone, Debug)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub cors_origins: Vec<String>,
    /// Budget for symbolic computation requests; carried for collaborators.
    pub compute_timeout: Duration,
    pub bind_addr: String,
    pub log_level: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let max_tokens = match get("MAX_TOKENS") {
            Some(v) => v.parse().map_err(|_| ConfigError::NotANumber {
                key: "MAX_TOKENS",
                value: v.clone(),
            })?,
            None => DEFAULT_MAX_TOKENS,
        };

        let temperature: f32 = match get("TEMPERATURE") {
            Some(v) => v.parse().map_err(|_| ConfigError::NotANumber {
                key: "TEMPERATURE",
                value: v.clone(),
            })?,
            None => DEFAULT_TEMPERATURE,
        };
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::TemperatureOutOfRange(temperature));
        }

        let compute_timeout_secs = match get("COMPUTE_TIMEOUT_SECS") {
            Some(v) => v.parse().map_err(|_| ConfigError::NotANumber {
                key: "COMPUTE_TIMEOUT_SECS",
                value: v.clone(),
            })?,
            None => DEFAULT_COMPUTE_TIMEOUT_SECS,
        };

        let cors_origins = parse_origins(
            &get("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
        );

        Ok(Self {
            api_key: get("OPENROUTER_API_KEY"),
            base_url: get("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: get("DEFAULT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens,
            temperature,
            cors_origins,
            compute_timeout: Duration::from_secs(compute_timeout_secs),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
