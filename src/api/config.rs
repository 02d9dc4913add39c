//! Client configuration from the environment.
//!
//! - `PFMO_API_URL`: backend base URL (default `http://localhost:8000`)
//! - `PFMO_STATE_DIR`: where `state.json` lives (default `<config dir>/pfmo-admin`)
//! - `PFMO_HTTP_TIMEOUT_SECS`: per-request timeout (default 30)

use crate::storage::ClientError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: Url,
    pub state_dir: PathBuf,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ClientError> {
        let api_url = env::var("PFMO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let state_dir = env::var("PFMO_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_state_dir());
        let timeout_secs = match env::var("PFMO_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(
                    "Ignoring invalid PFMO_HTTP_TIMEOUT_SECS={:?}, using {}s",
                    raw, DEFAULT_TIMEOUT_SECS
                );
                DEFAULT_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url: parse_api_url(&api_url)?,
            state_dir,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ClientError> {
        self.api_url = parse_api_url(api_url)?;
        Ok(self)
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw)
        .map_err(|e| ClientError::InvalidInput(format!("Invalid API URL {:?}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClientError::InvalidInput(format!(
            "API URL must be http or https, got {}",
            other
        ))),
    }
}

fn default_state_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pfmo-admin")
}
