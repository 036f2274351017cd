// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::routing::DispatchMode;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub theme: ThemeConfig,
    pub dispatch: DispatchConfig,
    pub startup: StartupConfig,
    pub logging: LoggingConfig,
}

/// Theme layout configuration
///
/// `routes_file` and `handlers_dir` are relative to `dir` unless absolute.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ThemeConfig {
    pub dir: String,
    pub routes_file: String,
    pub handlers_dir: String,
}

impl ThemeConfig {
    pub fn routes_path(&self, theme_dir: &Path) -> PathBuf {
        theme_dir.join(&self.routes_file)
    }

    pub fn handlers_path(&self, theme_dir: &Path) -> PathBuf {
        theme_dir.join(&self.handlers_dir)
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            routes_file: "routes.toml".to_string(),
            handlers_dir: "handlers".to_string(),
        }
    }
}

/// Dispatch configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DispatchConfig {
    #[serde(default)]
    pub mode: DispatchMode,
}

/// Startup configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StartupConfig {
    /// Environment variable marking a command-line admin context
    #[serde(default = "default_cli_env_flag")]
    pub cli_env_flag: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_cli_env_flag() -> String {
    "THEME_ROUTER_CLI".to_string()
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            cli_env_flag: default_cli_env_flag(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Write a log line for every handler invocation
    pub dispatch_log: bool,
    /// Dispatch log format (text, json, or custom pattern)
    #[serde(default = "default_dispatch_log_format")]
    pub dispatch_log_format: String,
    /// Log file path (optional, stdout if not set)
    #[serde(default)]
    pub log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_dispatch_log_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dispatch_log: true,
            dispatch_log_format: default_dispatch_log_format(),
            log_file: None,
            error_log_file: None,
        }
    }
}
