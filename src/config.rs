//! Configuration management for the traveller agent
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TravelAiError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable holding the Gemini credential
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "TRAVELLER_CONFIG";

/// Root configuration structure for the traveller agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Language model configuration
    pub llm: LlmConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Plan generation settings
    pub planner: PlannerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Language model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Gemini API key; when absent the planner runs in degraded mode
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// Base URL of the generative language API
    pub base_url: String,
    /// Sampling temperature
    pub temperature: f32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: String,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

/// Plan generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Currency symbol placed in front of budget amounts in prompts
    pub currency_symbol: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_llm_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_llm_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_llm_temperature() -> f32 {
    0.3
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_llm_model(),
            base_url: default_llm_base_url(),
            temperature: default_llm_temperature(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            static_dir: default_static_dir(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ServerConfig {
    /// Socket address the server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

impl AgentConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from_path(path)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        let source = config_file.exists().then(|| config_file.clone());
        if source.is_some() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. TRAVELLER_SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("TRAVELLER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AgentConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.source = source;

        if config.llm.api_key.is_none() {
            config.llm.api_key = std::env::var(API_KEY_ENV).ok();
        }

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("traveller-agent").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        // A blank key means "not configured", not an invalid key
        if self
            .llm
            .api_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            self.llm.api_key = None;
        }
        if self.llm.model.is_empty() {
            self.llm.model = default_llm_model();
        }
        if self.llm.base_url.is_empty() {
            self.llm.base_url = default_llm_base_url();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.server.max_body_bytes == 0 {
            self.server.max_body_bytes = default_max_body_bytes();
        }
        if self.planner.currency_symbol.is_empty() {
            self.planner.currency_symbol = default_currency_symbol();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(TravelAiError::config("LLM temperature must be between 0.0 and 2.0").into());
        }

        if self.server.max_body_bytes > 10 * 1024 * 1024 {
            return Err(
                TravelAiError::config("Maximum request body size cannot exceed 10 MB").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelAiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelAiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.llm.base_url.starts_with("http://") && !self.llm.base_url.starts_with("https://")
        {
            return Err(TravelAiError::config(
                "LLM base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.llm.model.contains('/') || self.llm.model.contains(char::is_whitespace) {
            return Err(TravelAiError::config(format!(
                "Invalid model name '{}'",
                self.llm.model
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert!(config.llm.base_url.contains("generativelanguage.googleapis.com"));
        assert!((config.llm.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.planner.currency_symbol, "₹");
        assert_eq!(config.logging.level, "info");
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_missing_api_key_is_valid() {
        let config = AgentConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_api_key_treated_as_missing() {
        let mut config = AgentConfig::default();
        config.llm.api_key = Some("   ".to_string());
        config.apply_defaults();
        assert!(config.llm.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_short_api_key_accepted() {
        let mut config = AgentConfig::default();
        config.llm.api_key = Some("abc1234".to_string());
        config.apply_defaults();
        assert!(config.validate().is_ok());
        assert_eq!(config.llm.api_key.as_deref(), Some("abc1234"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = AgentConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_temperature_range() {
        let mut config = AgentConfig::default();
        config.llm.temperature = 3.5;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("temperature"));
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = AgentConfig::default();
        config.llm.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = AgentConfig::default();
        config.llm.model.clear();
        config.server.port = 0;
        config.planner.currency_symbol.clear();
        config.apply_defaults();
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.planner.currency_symbol, "₹");
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "traveller-agent-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"
[llm]
api_key = "k1"
model = "gemini-2.5-pro"

[server]
port = 9100

[planner]
currency_symbol = "$"
"#,
        )
        .unwrap();

        let config = AgentConfig::load_from_path(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert_eq!(config.llm.api_key.as_deref(), Some("k1"));
        assert_eq!(config.llm.model, "gemini-2.5-pro");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.planner.currency_symbol, "$");
    }

    #[test]
    fn test_socket_addr() {
        let config = AgentConfig::default();
        let addr = config.server.socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = AgentConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("traveller-agent"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
