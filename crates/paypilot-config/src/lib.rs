//! Configuration management for paypilot
//!
//! This module handles loading, validation, and management of
//! paypilot configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use error::{ConfigError, ConfigResult};

/// Page sizes offered by the transaction table
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 20];

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Simulated backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Artificial latency applied to every fetch
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Number of transactions synthesized per fetch
    #[serde(default = "default_transaction_count")]
    pub transaction_count: usize,
    /// Probability that a fetch fails (0.0 - 1.0)
    #[serde(default)]
    pub failure_rate: f64,
    /// Fixed RNG seed for reproducible data
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            transaction_count: default_transaction_count(),
            failure_rate: 0.0,
            seed: None,
        }
    }
}

fn default_latency_ms() -> u64 {
    800
}

fn default_transaction_count() -> usize {
    52
}

/// Transaction table settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsConfig {
    /// Quiet period before a search query is committed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Initial rows per page, one of PAGE_SIZE_OPTIONS
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

impl Default for TransactionsConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            default_page_size: default_page_size(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_page_size() -> usize {
    10
}

/// Demo login settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    /// Visitor sessions idle longer than this are dropped
    #[serde(default = "default_session_idle_minutes")]
    pub session_idle_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
            session_idle_minutes: default_session_idle_minutes(),
        }
    }
}

fn default_min_password_length() -> usize {
    6
}

fn default_session_idle_minutes() -> u64 {
    30
}

/// Appearance settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppearanceConfig {
    #[serde(default)]
    pub default_theme: Theme,
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(format!("Invalid theme: {}", s)),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub transactions: TransactionsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }
        let content = std::fs::read_to_string(&path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.simulation.failure_rate) {
            return Err(ConfigError::InvalidValue {
                field: "simulation.failure_rate".to_string(),
                reason: "Failure rate must be between 0.0 and 1.0".to_string(),
            });
        }

        if !PAGE_SIZE_OPTIONS.contains(&self.transactions.default_page_size) {
            return Err(ConfigError::InvalidValue {
                field: "transactions.default_page_size".to_string(),
                reason: format!("Page size must be one of {:?}", PAGE_SIZE_OPTIONS),
            });
        }

        if self.transactions.debounce_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "transactions.debounce_ms".to_string(),
                reason: "Debounce window must be greater than 0".to_string(),
            });
        }

        if self.auth.min_password_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.min_password_length".to_string(),
                reason: "Minimum password length must be greater than 0".to_string(),
            });
        }

        if self.auth.session_idle_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.session_idle_minutes".to_string(),
                reason: "Session idle timeout must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Artificial latency of the simulated backend
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.simulation.latency_ms)
    }

    /// Search debounce window
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.transactions.debounce_ms)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.auth.session_idle_minutes * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigErrorCode, ConfigErrorSeverity};

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.simulation.latency_ms, 800);
        assert_eq!(config.simulation.transaction_count, 52);
        assert_eq!(config.transactions.debounce_ms, 300);
        assert_eq!(config.transactions.default_page_size, 10);
        assert_eq!(config.appearance.default_theme, Theme::Dark);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = Config::from_yaml("server:\n  port: 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.auth.min_password_length, 6);
        assert_eq!(config.session_idle_timeout(), Duration::from_secs(30 * 60));
    }

    #[test]
    fn test_rejects_page_size_outside_options() {
        let err = Config::from_yaml("transactions:\n  default_page_size: 7\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);
        assert_eq!(err.to_details().field.as_deref(), Some("transactions.default_page_size"));
    }

    #[test]
    fn test_rejects_failure_rate_out_of_range() {
        let err = Config::from_yaml("simulation:\n  failure_rate: 1.5\n").unwrap_err();
        assert!(err.to_string().contains("simulation.failure_rate"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [unclosed").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidYaml);
        assert_eq!(err.severity(), ConfigErrorSeverity::Error);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(PathBuf::from("/nonexistent/paypilot.yaml")).unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);
        assert_eq!(err.severity(), ConfigErrorSeverity::Warning);
        assert!(!err.to_details().suggestions.is_empty());
    }

    #[test]
    fn test_theme_parse_and_toggle() {
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }
}
