use std::path::PathBuf;
use std::time::Duration;

use crate::session::SessionStore;
use crate::utils::AppError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `BANK_API_BASE_URL`
    pub api_base_url: String,
    /// `BANK_SESSION_FILE`
    pub session_file: PathBuf,
    /// `BANK_HTTP_TIMEOUT_SECS`
    pub http_timeout: Duration,
    /// `BANK_REFRESH_AFTER_DECISION`: re-fetch requests after accept/reject
    pub refresh_after_decision: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = value("BANK_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let session_file = match value("BANK_SESSION_FILE") {
            Some(path) => PathBuf::from(path),
            None => SessionStore::default_path()?,
        };

        let http_timeout = match value("BANK_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                    AppError::InvalidConfig(format!(
                        "BANK_HTTP_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    ))
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let refresh_after_decision = match value("BANK_REFRESH_AFTER_DECISION") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                AppError::InvalidConfig(format!(
                    "BANK_REFRESH_AFTER_DECISION must be true or false, got '{}'",
                    raw
                ))
            })?,
            None => true,
        };

        Ok(Self {
            api_base_url,
            session_file,
            http_timeout,
            refresh_after_decision,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
