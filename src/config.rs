//! Process-wide client configuration.
//!
//! The API base endpoint and the request timeout ceiling are fixed for the
//! lifetime of the process and apply uniformly to every call.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_APP_NAME: &str = "XU-News-AI-RAG";

/// Errors produced while building a [`ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The base URL is empty or lacks an `http://`/`https://` scheme.
    #[error("invalid API base URL: {0:?}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base endpoint every request path is appended to, without trailing `/`.
    pub api_base_url: String,
    /// Ceiling applied to every request by the transport.
    pub request_timeout: Duration,
    /// Suffix used when composing the document title.
    pub app_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            app_name: DEFAULT_APP_NAME.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build config from a variable lookup.
    ///
    /// Optional:
    /// - `KB_API_BASE_URL`: default `http://localhost:5000/api`
    /// - `KB_REQUEST_TIMEOUT_MS`: default 30000
    /// - `KB_APP_NAME`: default `XU-News-AI-RAG`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when `KB_API_BASE_URL` is set
    /// to something that is not an absolute http(s) URL.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = match lookup("KB_API_BASE_URL") {
            Some(raw) => normalize_base_url(&raw)?,
            None => DEFAULT_API_BASE_URL.to_owned(),
        };
        let timeout_ms = lookup("KB_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        let app_name = lookup("KB_APP_NAME")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_owned());

        Ok(Self { api_base_url, request_timeout: Duration::from_millis(timeout_ms), app_name })
    }

    /// Build config from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_vars`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build config from variables captured at compile time.
    ///
    /// A WASM bundle has no process environment, so deployments bake the
    /// values in when building.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_vars`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| {
            let value = match key {
                "KB_API_BASE_URL" => option_env!("KB_API_BASE_URL"),
                "KB_REQUEST_TIMEOUT_MS" => option_env!("KB_REQUEST_TIMEOUT_MS"),
                "KB_APP_NAME" => option_env!("KB_APP_NAME"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}
