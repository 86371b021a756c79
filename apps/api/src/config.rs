use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_ENDPOINT;

const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_ADVISORY_MAX_RETRIES: u32 = 3;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub dashscope_api_key: String,
    pub dashscope_endpoint: String,
    pub advisory_max_retries: u32,
    pub upload_limit_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            dashscope_api_key: require_env("DASHSCOPE_API_KEY")?,
            dashscope_endpoint: std::env::var("DASHSCOPE_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            advisory_max_retries: parse_env("ADVISORY_MAX_RETRIES", DEFAULT_ADVISORY_MAX_RETRIES)?,
            upload_limit_bytes: parse_env("UPLOAD_LIMIT_BYTES", DEFAULT_UPLOAD_LIMIT_BYTES)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}
