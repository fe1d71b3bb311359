//! Configuration management for ragview.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Defaults
//! - Config files (.ragview/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! The configuration is workspace-centric, with local state stored in `.ragview/`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Address of the query service when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8003/query";

/// How long the empty-query notice stays visible.
pub const DEFAULT_EMPTY_QUERY_NOTICE_MS: u64 = 3000;

/// How long the request-failed notice stays visible.
pub const DEFAULT_REQUEST_FAILED_NOTICE_MS: u64 = 5000;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .ragview/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Full URL of the query service's POST endpoint
    pub endpoint: String,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Notice auto-dismiss delays
    pub notices: NoticeConfig,
}

/// Auto-dismiss delays for the two user-facing notices, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeConfig {
    #[serde(rename = "emptyQueryMs", default = "default_empty_query_ms")]
    pub empty_query_ms: u64,

    #[serde(rename = "requestFailedMs", default = "default_request_failed_ms")]
    pub request_failed_ms: u64,
}

fn default_empty_query_ms() -> u64 {
    DEFAULT_EMPTY_QUERY_NOTICE_MS
}

fn default_request_failed_ms() -> u64 {
    DEFAULT_REQUEST_FAILED_NOTICE_MS
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            empty_query_ms: DEFAULT_EMPTY_QUERY_NOTICE_MS,
            request_failed_ms: DEFAULT_REQUEST_FAILED_NOTICE_MS,
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    service: Option<ServiceConfig>,
    notices: Option<NoticeConfig>,
    workspace: Option<WorkspaceConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServiceConfig {
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            log_level: None,
            verbose: false,
            no_color: false,
            notices: NoticeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the YAML config file and environment variables.
    ///
    /// Environment variables:
    /// - `RAGVIEW_WORKSPACE`: Override workspace path
    /// - `RAGVIEW_CONFIG`: Path to config file
    /// - `RAGVIEW_ENDPOINT`: Query service endpoint
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use ragview_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Endpoint: {}", config.endpoint);
    /// ```
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("RAGVIEW_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("RAGVIEW_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.ragview_dir().join("config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(endpoint) = std::env::var("RAGVIEW_ENDPOINT") {
            config.endpoint = endpoint;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    pub fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(ws) = config_file.workspace {
            if let Some(path) = ws.path {
                result.workspace = PathBuf::from(path);
            }
        }

        if let Some(service) = config_file.service {
            if let Some(endpoint) = service.endpoint {
                result.endpoint = endpoint;
            }
        }

        if let Some(notices) = config_file.notices {
            result.notices = notices;
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the config file and environment.
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        endpoint: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .ragview directory.
    pub fn ragview_dir(&self) -> PathBuf {
        self.workspace.join(".ragview")
    }

    /// Path of the log file used while the terminal UI owns the screen.
    pub fn log_file(&self) -> PathBuf {
        self.ragview_dir().join("logs").join("ragview.log")
    }

    /// Ensure the .ragview/logs directory exists.
    pub fn ensure_log_dir(&self) -> AppResult<()> {
        let log_dir = self.ragview_dir().join("logs");
        if !log_dir.exists() {
            std::fs::create_dir_all(&log_dir).map_err(|e| {
                AppError::Config(format!("Failed to create log directory {:?}: {}", log_dir, e))
            })?;
        }
        Ok(())
    }

    /// Validate the configured endpoint and notice delays.
    pub fn validate(&self) -> AppResult<()> {
        let url = url::Url::parse(&self.endpoint).map_err(|e| {
            AppError::Config(format!("Invalid endpoint '{}': {}", self.endpoint, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Unsupported endpoint scheme '{}'. Supported: http, https",
                url.scheme()
            )));
        }

        if self.notices.empty_query_ms == 0 || self.notices.request_failed_ms == 0 {
            return Err(AppError::Config(
                "Notice durations must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
