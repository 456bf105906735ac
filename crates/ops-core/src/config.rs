use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    API_BASE_ENV, DEFAULT_API_BASE, DEFAULT_RECONNECT_DELAY_MS, DEFAULT_REQUEST_TIMEOUT_SECS,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid base URL: {0:?}")]
    InvalidBaseUrl(String),
    #[error("requestTimeoutSecs must be greater than zero")]
    ZeroRequestTimeout,
}

/// Config file contents. Every key is optional; missing keys keep defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Reconnection delay for the push channel until the server sends `retry:`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconnect_delay_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// API origin without a trailing slash, e.g. `http://localhost:8080`
    pub base_url: String,
    pub reconnect_delay: Duration,
    pub request_timeout: Duration,
}

impl CoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            reconnect_delay: Duration::from_millis(DEFAULT_RECONNECT_DELAY_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// `<config dir>/ops-companion/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ops-companion").join("config.json"))
    }

    /// Resolve defaults, then the config file, then `OPS_API_BASE`.
    ///
    /// An explicit `path` must exist. Without one, the default path is read
    /// only if present.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::resolve_with_env(path, std::env::var(API_BASE_ENV).ok())
    }

    pub fn resolve_with_env(
        path: Option<&Path>,
        env_base_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => Some(FileConfig::load(path)?),
            None => match Self::default_path() {
                Some(default) if default.exists() => Some(FileConfig::load(&default)?),
                _ => None,
            },
        };

        let mut config = Self::default();
        if let Some(file) = file {
            config.apply_file(file);
        }
        if let Some(base_url) = env_base_url.filter(|v| !v.trim().is_empty()) {
            config.base_url = normalize_base_url(&base_url);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(base_url) = file.base_url {
            self.base_url = normalize_base_url(&base_url);
        }
        if let Some(ms) = file.reconnect_delay_ms {
            self.reconnect_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(&base_url.into());
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroRequestTimeout);
        }
        Ok(())
    }

    /// Absolute URL for an API path (paths start with `/`)
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
