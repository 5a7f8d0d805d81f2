//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::auth::TokenProvider;

/// Environment variable holding the API base URL.
pub const ENV_URL: &str = "ATLAS_COMMAND_URL";

/// Environment variable holding the bearer token.
pub const ENV_TOKEN: &str = "ATLAS_COMMAND_TOKEN";

/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT: &str = "ATLAS_COMMAND_TIMEOUT";

/// Atlas Command client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token.
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `ATLAS_COMMAND_URL` | API base URL |
    /// | `ATLAS_COMMAND_TOKEN` | Bearer token (empty means none) |
    /// | `ATLAS_COMMAND_TIMEOUT` | Request timeout in seconds |
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(ENV_URL).unwrap_or_else(|_| default_base_url()),
            token: TokenProvider::from_env().token().map(String::from),
            timeout_secs: std::env::var(ENV_TIMEOUT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
