//! Configuration management for finboard
//!
//! This module handles loading, validation, and management of
//! finboard configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

/// Relational data service configuration
///
/// The data service is an external PostgREST-style HTTP API; finboard
/// never talks to a database directly.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Base URL of the data service (e.g., "https://project.example.co")
    #[serde(default)]
    pub base_url: String,
    /// API key sent with every request
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
}

fn default_store_timeout() -> u64 {
    10
}

/// Text generator (AI advisor) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Chat-completions endpoint base URL
    #[serde(default = "default_advisor_url")]
    pub base_url: String,
    /// API key for the text generator
    #[serde(default)]
    pub api_key: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum response tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Hours before a recommendation batch is considered stale
    #[serde(default = "default_freshness_hours")]
    pub freshness_hours: i64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            base_url: default_advisor_url(),
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            freshness_hours: default_freshness_hours(),
        }
    }
}

fn default_advisor_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_freshness_hours() -> i64 {
    24
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaginationConfig {
    /// Records per page for lists
    #[serde(default = "default_records_per_page")]
    pub records_per_page: usize,
}

fn default_records_per_page() -> usize {
    50
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data service settings
    #[serde(default)]
    pub store: StoreConfig,
    /// Text generator settings
    #[serde(default)]
    pub advisor: AdvisorConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::FileNotFound { path: path.to_string_lossy().to_string() })?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.store.base_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "store.base_url".to_string(),
            });
        }

        if self.advisor.freshness_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "advisor.freshness_hours".to_string(),
                reason: "Freshness window must be at least one hour".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&self.advisor.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "advisor.temperature".to_string(),
                reason: "Temperature must be between 0.0 and 2.0".to_string(),
            });
        }

        Ok(())
    }
}
