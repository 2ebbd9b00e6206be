// src/config.rs
// =============================================================================
// Application configuration.
//
// Layers (later wins):
// 1. Built-in defaults
// 2. Optional TOML file passed with --config
// 3. Command-line flags (applied in main.rs)
//
// Every field has a default, so an empty file is a valid config.
// =============================================================================

use crate::probe::ProbeSettings;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub log_level: String,
    pub server: ServerConfig,
    pub probe: ProbeConfig,
    pub questions: QuestionsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    pub timeout_secs: u64,
    pub max_concurrency: usize,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuestionsConfig {
    /// JSON file with the questions; none means an empty list
    pub file: Option<PathBuf>,
    pub latest_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: "info".to_string(),
            server: ServerConfig::default(),
            probe: ProbeConfig::default(),
            questions: QuestionsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1:8000".to_string(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        let defaults = ProbeSettings::default();
        ProbeConfig {
            timeout_secs: defaults.timeout.as_secs(),
            max_concurrency: defaults.max_concurrency,
            user_agent: defaults.user_agent,
        }
    }
}

impl Default for QuestionsConfig {
    fn default() -> Self {
        QuestionsConfig {
            file: None,
            latest_limit: 5,
        }
    }
}

impl AppConfig {
    /// Loads the file at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                toml::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => AppConfig::default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe.timeout_secs == 0 {
            return Err(ConfigError::Invalid("probe.timeout_secs must be > 0".to_string()));
        }
        if self.probe.max_concurrency == 0 {
            return Err(ConfigError::Invalid("probe.max_concurrency must be > 0".to_string()));
        }
        if self.questions.latest_limit == 0 {
            return Err(ConfigError::Invalid("questions.latest_limit must be > 0".to_string()));
        }
        self.bind_addr()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.bind.parse().map_err(|e| {
            ConfigError::Invalid(format!(
                "server.bind '{}' is not a socket address: {}",
                self.server.bind, e
            ))
        })
    }

    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            timeout: Duration::from_secs(self.probe.timeout_secs),
            user_agent: self.probe.user_agent.clone(),
            max_concurrency: self.probe.max_concurrency,
        }
    }
}
