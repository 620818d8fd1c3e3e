//! Client configuration from CLI flags and environment variables.

use clap::Parser;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Parser, Debug, Clone)]
#[command(name = "group-swipe")]
#[command(about = "Join a group swipe session and vote on restaurants together")]
pub struct Config {
    /// Base URL of the session service
    #[arg(long, env = "GROUP_SWIPE_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "GROUP_SWIPE_REQUEST_TIMEOUT_MS", default_value_t = 10_000)]
    pub request_timeout_ms: u64,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "GROUP_SWIPE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout_ms: 10_000,
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_ms == 0 {
            return Err("request timeout must be greater than zero".to_owned());
        }
        reqwest::Url::parse(&self.api_base_url)
            .map_err(|e| format!("invalid api base url {}: {}", self.api_base_url, e))?;
        Ok(())
    }
}
