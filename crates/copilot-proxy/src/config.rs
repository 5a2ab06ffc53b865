//! Configuration from environment variables.
//!
//! Read once at process entry and passed into the server as immutable state.
//!
//! **Environment variables:**
//! - `PORT`: server port (default: 8888)
//! - `GITHUB_TOKEN`: bearer credential sent to the Copilot API
//! - `COPILOT_API_URL`: base URL of the Copilot API (default: https://api.githubcopilot.com)
//! - `REQUEST_TIMEOUT_SECS`: upstream request timeout (default: 30)

use secrecy::{ExposeSecret, SecretString};
use std::env;

pub const DEFAULT_PORT: u16 = 8888;
pub const DEFAULT_COPILOT_API_URL: &str = "https://api.githubcopilot.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Stand-in token used when `GITHUB_TOKEN` is unset.
pub const PLACEHOLDER_TOKEN: &str = "your-github-token-here";

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub port: u16,
    pub github_token: SecretString,
    pub copilot_api_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            github_token: SecretString::from(PLACEHOLDER_TOKEN),
            copilot_api_url: DEFAULT_COPILOT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparseable numbers fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
            github_token: lookup("GITHUB_TOKEN")
                .filter(|t| !t.is_empty())
                .map(SecretString::from)
                .unwrap_or(defaults.github_token),
            copilot_api_url: lookup("COPILOT_API_URL")
                .filter(|u| !u.is_empty())
                .unwrap_or(defaults.copilot_api_url),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    pub fn copilot_api_url_trimmed(&self) -> String {
        self.copilot_api_url.trim_end_matches('/').to_string()
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.copilot_api_url_trimmed())
    }

    pub fn uses_placeholder_token(&self) -> bool {
        self.github_token.expose_secret() == PLACEHOLDER_TOKEN
    }
}
