//! # Client configuration
//!
//! Where the content API lives and how long a request may take. The base URL comes
//! from the environment with a hardcoded fallback host; the timeout is a fixed
//! constant. Both are frozen when the transport is constructed.
//!
//! ## Sources
//!
//! | Target | `PORTFOLIO_API_URL` read from |
//! |--------|-------------------------------|
//! | native | process environment, after `dotenvy` loads an optional `.env` |
//! | wasm | captured at compile time (`option_env!`), as bundlers do for web builds |
//!
//! A TOML form is also supported for desktop builds that ship a config file:
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000/api"
//! ```
//!
//! Every field has a default, so a missing or empty file equals
//! [`ClientConfig::default`]. The timeout is not configurable; a `timeout_ms` key in
//! an old file is ignored.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "PORTFOLIO_API_URL";

/// Fallback host used when no base URL is configured.
pub const DEFAULT_API_URL: &str = "https://portfolio-backend-gray-phi.vercel.app/api";

/// Fixed request timeout in milliseconds.
pub const REQUEST_TIMEOUT_MS: u64 = 15_000;

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Content API endpoint settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to. No trailing slash needed.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ApiConfig {
    /// Always [`REQUEST_TIMEOUT_MS`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(REQUEST_TIMEOUT_MS)
    }
}

impl ClientConfig {
    /// Create a config pointing at `base_url` with the fixed timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
            },
        }
    }

    /// Resolve the configuration from the environment, falling back to the default host.
    pub fn from_env() -> Self {
        Self::from_lookup(read_env_url())
    }

    /// Build from an optional base URL; blank values fall back to the default host.
    pub fn from_lookup(base_url: Option<String>) -> Self {
        match base_url.map(|url| url.trim().to_string()) {
            Some(url) if !url.is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_env_url() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(API_URL_ENV).ok()
}

#[cfg(target_arch = "wasm32")]
fn read_env_url() -> Option<String> {
    option_env!("PORTFOLIO_API_URL").map(str::to_string)
}
