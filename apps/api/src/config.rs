use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_GATEWAY_URL, DEFAULT_MODEL};

/// Largest PDF accepted by the extraction endpoint (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_PENDING_TTL_MINUTES: i64 = 60;

/// Application configuration loaded from environment variables.
///
/// Only malformed values fail startup. A missing gateway credential is
/// tolerated here and reported per request as a configuration error.
#[derive(Debug, Clone)]
pub struct Config {
    pub gateway_api_key: Option<String>,
    pub gateway_url: String,
    pub gateway_model: String,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub pending_ttl_minutes: i64,
    /// Honour `?plan=` / `?qa=` paid-view overrides. Development and QA only.
    pub qa_overrides: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gateway_api_key: optional_env("GATEWAY_API_KEY"),
            gateway_url: optional_env("GATEWAY_URL")
                .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            gateway_model: optional_env("GATEWAY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            pending_ttl_minutes: parse_env("PENDING_TTL_MINUTES", DEFAULT_PENDING_TTL_MINUTES)?,
            qa_overrides: parse_env("QA_OVERRIDES", false)?,
        })
    }
}

/// Reads `key`, treating an unset or blank value as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
