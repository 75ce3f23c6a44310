use std::env;
use std::time::Duration;

use crate::error::{Result, TorneoError};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const ENV_BASE_URL: &str = "TORNEO_API_URL";
const ENV_TOKEN: &str = "TORNEO_API_TOKEN";
const ENV_TIMEOUT: &str = "TORNEO_API_TIMEOUT_SECS";

/// Connection settings for [`TorneoClient`](crate::TorneoClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root of the REST API, without a trailing slash.
    pub base_url: String,
    /// Bearer token attached to every request when set.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Read settings from the environment, loading a `.env` file first when
    /// one exists. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            let url = url.trim().trim_end_matches('/');
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(TorneoError::Config(format!(
                    "{ENV_BASE_URL} must be an http(s) URL, got {url:?}"
                )));
            }
            config.base_url = url.to_owned();
        }

        config.token = lookup(ENV_TOKEN).filter(|t| !t.trim().is_empty());

        if let Some(secs) = lookup(ENV_TIMEOUT) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                TorneoError::Config(format!("{ENV_TIMEOUT} must be whole seconds, got {secs:?}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
