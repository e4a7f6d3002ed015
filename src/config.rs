//! Service configuration: artifact locations, HTTP server, logging.
//! Loaded once at startup from a JSON file; absent file means defaults.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Env var naming the config file (default `config.json`)
pub const CONFIG_PATH_ENV: &str = "PHISHSCAN_CONFIG_PATH";
/// Env var overriding `server.port`
pub const PORT_ENV: &str = "PHISHSCAN_PORT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Persisted scaler and classifier artifacts
    pub model: ModelConfig,
    /// HTTP listener and CORS
    pub server: ServerConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Scaler parameters (JSON)
    pub scaler_path: PathBuf,
    /// Classifier artifact (JSON)
    pub model_path: PathBuf,
    /// Pinned SHA-256 (hex) of the scaler artifact
    pub scaler_sha256: Option<String>,
    /// Pinned SHA-256 (hex) of the classifier artifact
    pub model_sha256: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Exact origins allowed by CORS
    pub cors_origins: Vec<String>,
    /// Also allow any http(s) origin on localhost / 127.0.0.1, any port
    pub allow_local_origins: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            scaler_path: PathBuf::from("models/scaler.json"),
            model_path: PathBuf::from("models/phishing_model.json"),
            scaler_sha256: None,
            model_sha256: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        let cors_origins = ["localhost", "127.0.0.1"]
            .iter()
            .flat_map(|host| [5173, 3000, 8080].map(|port| format!("http://{host}:{port}")))
            .collect();
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins,
            allow_local_origins: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl ServiceConfig {
    /// Load from JSON file if present; otherwise defaults. A file that exists but
    /// cannot be read or parsed is an error, not a silent fallback.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `PHISHSCAN_CONFIG_PATH` (or `config.json`), apply env overrides, validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.json"));
        let mut config = Self::load(&path)?;
        if let Ok(port) = std::env::var(PORT_ENV) {
            config.server.port = port
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("{PORT_ENV}={port}: {e}")))?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("port cannot be 0".into()));
        }
        if self.server.bind_addr.trim().is_empty() {
            return Err(ConfigError::Invalid("bind_addr cannot be empty".into()));
        }
        if self.model.scaler_path.as_os_str().is_empty() || self.model.model_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("artifact paths cannot be empty".into()));
        }
        for digest in [&self.model.scaler_sha256, &self.model.model_sha256].into_iter().flatten() {
            if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ConfigError::Invalid(format!("not a SHA-256 hex digest: {digest}")));
            }
        }
        Ok(())
    }
}
