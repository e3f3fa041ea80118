use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Default service address, matching a locally run detection backend.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Environment variable consulted when no explicit base URL is given.
pub const API_BASE_ENV: &str = "DERMASCAN_API_BASE";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base() -> String {
    env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientSettings {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading client settings {}", path_ref.display()))?;
        let mut settings: ClientSettings = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing client settings {}", path_ref.display()))?;
        settings.api_base = normalize_base(&settings.api_base);
        Ok(settings)
    }

    pub fn from_env() -> Self {
        Self {
            api_base: normalize_base(&default_api_base()),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// CLI flag beats settings file beats environment beats default.
    pub fn resolve(config: Option<&Path>, override_base: Option<&str>) -> anyhow::Result<Self> {
        let mut settings = match config {
            Some(path) => Self::load(path)?,
            None => Self::from_env(),
        };
        if let Some(base) = override_base {
            settings.api_base = normalize_base(base);
        }
        Ok(settings)
    }

    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.api_base, path)
    }
}

/// Strips trailing slashes so joined URLs never double up.
fn normalize_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

/// Joins a server-relative path onto the base URL.
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
