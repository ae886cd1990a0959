//! Client configuration loaded from the process environment.

use std::env;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{NotehubError, Result};

pub const DEFAULT_API_URL: &str = "https://notehub-public.goit.study/api";
pub const DEFAULT_PER_PAGE: u32 = 12;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

pub const API_URL_VAR: &str = "NOTEHUB_API_URL";
pub const TOKEN_VAR: &str = "NOTEHUB_TOKEN";
pub const LEGACY_TOKEN_VAR: &str = "VITE_NOTEHUB_TOKEN";
pub const TIMEOUT_VAR: &str = "NOTEHUB_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, without the `/notes` collection segment.
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
    pub per_page: u32,
    pub debounce: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: None,
            per_page: DEFAULT_PER_PAGE,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match non_empty(lookup(API_URL_VAR)) {
            Some(url) => url,
            None => {
                info!("{API_URL_VAR} not set, using default: {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            }
        };
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            warn!("Invalid {API_URL_VAR} value: {base_url}");
            return Err(NotehubError::Config(format!(
                "{API_URL_VAR} must be an http(s) URL, got '{base_url}'"
            )));
        }

        let token = non_empty(lookup(TOKEN_VAR)).or_else(|| non_empty(lookup(LEGACY_TOKEN_VAR)));
        if token.is_none() {
            warn!("{TOKEN_VAR} not set, requests will be sent without authorization");
        }

        let timeout = match non_empty(lookup(TIMEOUT_VAR)) {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|e| {
                    warn!("Invalid {TIMEOUT_VAR} value: {e}");
                    NotehubError::Config(format!("{TIMEOUT_VAR} must be whole seconds, got '{raw}'"))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout,
            ..Self::default()
        })
    }

    /// URL of the notes collection.
    pub fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url.trim_end_matches('/'))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
