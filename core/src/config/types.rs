use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analyze::WeightsMode;
use crate::strategy::Strategy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "warn" or "taskrank_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Directory for log files. Unset or blank means `~/.taskrank/logs`.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

impl LoggingConfig {
    /// Where file logs go: the configured directory, else `~/.taskrank/logs`,
    /// else `<tmp>/taskrank/logs` when no home directory is known.
    pub fn log_dir(&self) -> PathBuf {
        if let Some(dir) = self
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return PathBuf::from(dir);
        }
        super::get_taskrank_data_dir()
            .unwrap_or_else(|_| std::env::temp_dir().join("taskrank"))
            .join("logs")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_analyze_path")]
    pub analyze_path: String,

    #[serde(default = "default_suggest_path")]
    pub suggest_path: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_analyze_path() -> String {
    "/api/tasks/analyze/".to_string()
}

fn default_suggest_path() -> String {
    "/api/tasks/suggest/".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            analyze_path: default_analyze_path(),
            suggest_path: default_suggest_path(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_strategy")]
    pub default_strategy: String,

    /// Send no weights and let the service apply its own defaults.
    #[serde(default)]
    pub use_service_weights: bool,
}

fn default_strategy() -> String {
    Strategy::Smart.as_str().to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_strategy: default_strategy(),
            use_service_weights: false,
        }
    }
}

impl SessionConfig {
    pub fn weights_mode(&self) -> WeightsMode {
        if self.use_service_weights {
            WeightsMode::Service
        } else {
            WeightsMode::Preset
        }
    }
}
