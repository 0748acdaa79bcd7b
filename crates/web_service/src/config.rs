//! Configuration for the webhook service
//!
//! Loaded from environment variables with fallback to defaults.
//!
//! Environment variables:
//! - `APP_PORT`: HTTP listen port (default: 8080)
//! - `BOT_DATA_DIR`: directory for the JSON-file record store (default: `./data`)
//! - `TRANSPORT_REPLY_URL`: endpoint replies are posted to
//! - `TRANSPORT_PROFILE_URL`: endpoint for display-name lookups
//! - `TRANSPORT_ACCESS_TOKEN`: bearer token for the transport endpoints
//! - `STORE_BACKEND`: `memory` or `json` (default: `json`)
//! - `STORE_MAX_RETRIES`: retry attempts for transient store errors (default: 3)
//! - `STORE_RETRY_BASE_MS`: first retry pause in milliseconds (default: 100)

use std::path::PathBuf;
use std::time::Duration;

use record_store::RetryPolicy;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub reply_url: String,
    pub profile_url: String,
    pub access_token: String,
    pub store_backend: StoreBackend,
    pub retry: RetryPolicy,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let store_backend = match env_or("STORE_BACKEND", "json").as_str() {
            "memory" => StoreBackend::Memory,
            "json" => StoreBackend::Json,
            other => {
                return Err(AppError::Config(format!(
                    "unknown STORE_BACKEND {other:?}, expected \"memory\" or \"json\""
                )))
            }
        };
        Ok(Self {
            port: env_parse("APP_PORT", 8080),
            data_dir: PathBuf::from(env_or("BOT_DATA_DIR", "./data")),
            reply_url: env_or("TRANSPORT_REPLY_URL", "http://127.0.0.1:9000/reply"),
            profile_url: env_or("TRANSPORT_PROFILE_URL", "http://127.0.0.1:9000/profile"),
            access_token: env_or("TRANSPORT_ACCESS_TOKEN", ""),
            store_backend,
            retry: RetryPolicy::new(
                env_parse("STORE_MAX_RETRIES", 3),
                Duration::from_millis(env_parse("STORE_RETRY_BASE_MS", 100)),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_has_sensible_defaults() {
        let config = AppConfig::from_env().unwrap();
        assert!(config.port > 0);
        assert!(config.retry.max_attempts > 0);
        assert!(config.retry.base_delay.as_millis() > 0);
        assert!(!config.reply_url.is_empty());
    }
}
