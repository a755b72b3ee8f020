use dotenv::dotenv;
use std::env;

use crate::api_connection::endpoints::{DEFAULT_MODEL, GEMINI_BASE_URL};
use crate::i18n::Language;

pub const API_KEY_ENV_VAR_NAME: &str = "NUTRICARE_API_KEY_ENV";
pub const DEFAULT_API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";
const MODEL_ENV_VAR: &str = "NUTRICARE_MODEL";
const BASE_URL_ENV_VAR: &str = "NUTRICARE_API_BASE_URL";
const LANGUAGE_ENV_VAR: &str = "NUTRICARE_LANGUAGE";
const LOG_ENV_VAR: &str = "NUTRICARE_LOG";
const LOG_JSON_ENV_VAR: &str = "NUTRICARE_LOG_JSON";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Name of the environment variable that holds the API key.
    pub api_key_env_var: String,
    pub model: String,
    pub base_url: String,
    pub language: Language,
    pub log_filter: String,
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key_env_var: DEFAULT_API_KEY_ENV_VAR.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
            language: Language::En,
            log_filter: "nutricare=info".to_string(),
            json_logs: false,
        }
    }
}

impl AppConfig {
    /// Reads the environment (and `.env`, if present) on top of the defaults.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let language = match read(LANGUAGE_ENV_VAR) {
            Some(raw) => raw.parse::<Language>().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring {}", LANGUAGE_ENV_VAR);
                defaults.language
            }),
            None => defaults.language,
        };

        Self {
            api_key_env_var: read(API_KEY_ENV_VAR_NAME).unwrap_or(defaults.api_key_env_var),
            model: read(MODEL_ENV_VAR).unwrap_or(defaults.model),
            base_url: read(BASE_URL_ENV_VAR).unwrap_or(defaults.base_url),
            language,
            log_filter: read(LOG_ENV_VAR).unwrap_or(defaults.log_filter),
            json_logs: read(LOG_JSON_ENV_VAR).is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true")),
        }
    }
}
