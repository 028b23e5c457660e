//! Client configuration loading from file and environment variables.

use serde::Deserialize;
use thiserror::Error;

/// Top-level client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the audit-log service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API version segment used by the transport, e.g. `"v1"`.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Project whose audit log this client writes to and reads from.
    #[serde(default)]
    pub project_id: String,

    /// Stamped onto reported events that leave `component` empty.
    #[serde(default)]
    pub component: String,

    /// Stamped onto reported events that leave `version` empty.
    #[serde(default)]
    pub version: String,

    /// Results requested per page when streaming.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "auditline_query=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_endpoint() -> String {
    "https://api.auditable.io".to_string()
}

fn default_api_version() -> String {
    "v1".to_string()
}

fn default_page_size() -> usize {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_version: default_api_version(),
            project_id: String::new(),
            component: String::new(),
            version: String::new(),
            page_size: default_page_size(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl ClientConfig {
    /// Checks the settings a [`Client`](crate::Client) cannot work without.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".into()));
        }
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::Invalid("project_id must not be empty".into()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        Ok(())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting has an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `AUDITLINE_ENDPOINT` overrides `endpoint`
/// - `AUDITLINE_API_VERSION` overrides `api_version`
/// - `AUDITLINE_PROJECT_ID` overrides `project_id`
/// - `AUDITLINE_PAGE_SIZE` overrides `page_size`
/// - `AUDITLINE_LOG_LEVEL` overrides `logging.level`
/// - `AUDITLINE_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// The result is not validated; [`Client::new`](crate::Client::new) does
/// that.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<ClientConfig, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                ClientConfig::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => ClientConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Applies `AUDITLINE_*` overrides obtained through `lookup`.
///
/// Values that fail to parse are ignored.
pub fn apply_env_overrides<F>(config: &mut ClientConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup("AUDITLINE_ENDPOINT") {
        config.endpoint = endpoint;
    }
    if let Some(api_version) = lookup("AUDITLINE_API_VERSION") {
        config.api_version = api_version;
    }
    if let Some(project_id) = lookup("AUDITLINE_PROJECT_ID") {
        config.project_id = project_id;
    }
    if let Some(page_size) = lookup("AUDITLINE_PAGE_SIZE") {
        match page_size.parse() {
            Ok(parsed) => config.page_size = parsed,
            Err(_) => tracing::warn!(value = %page_size, "ignoring unparsable AUDITLINE_PAGE_SIZE"),
        }
    }
    if let Some(level) = lookup("AUDITLINE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("AUDITLINE_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
}
