use std::time::Duration;

use crate::services::trips::DEFAULT_SHARE_TTL_DAYS;

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres URL. Without it trips are kept in memory.
    pub database_url: Option<String>,
    pub port: u16,
    /// Completion credential. Without it every plan is rule-based.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    /// Deadline for the single model attempt per request.
    pub generation_timeout: Duration,
    pub max_output_tokens: u32,
    /// Optional restaurant directory used to enrich prompts.
    pub venue_api_url: Option<String>,
    pub venue_cache_ttl: Duration,
    pub share_ttl_days: i64,
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match optional_var(name) {
        Some(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{} must be a valid number, got {:?}", name, raw)),
        None => default,
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: optional_var("DATABASE_URL"),
            port: parsed_var("PORT", 8080),
            openai_api_key: optional_var("OPENAI_API_KEY"),
            openai_base_url: optional_var("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            openai_model: optional_var("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
            generation_timeout: Duration::from_secs(parsed_var("GENERATION_TIMEOUT_SECS", 25)),
            max_output_tokens: parsed_var("MAX_OUTPUT_TOKENS", 4000),
            venue_api_url: optional_var("VENUE_API_URL"),
            venue_cache_ttl: Duration::from_secs(parsed_var("VENUE_CACHE_TTL_SECS", 300)),
            share_ttl_days: parsed_var("SHARE_TTL_DAYS", DEFAULT_SHARE_TTL_DAYS),
        }
    }
}
