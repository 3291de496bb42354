//! Configuration module for loading and parsing TOML configuration files.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Backing store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Allow-list configuration.
    #[serde(default)]
    pub allow_list: AllowListConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
        }
    }
}

/// Backing store (Redis) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Redis connection URL.
    pub url: String,
    /// Key prefix for contract records.
    pub key_prefix: String,
    /// Per-fetch timeout in milliseconds; timeouts map to store-unavailable.
    pub fetch_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6380/0".to_string(),
            key_prefix: "option".to_string(),
            fetch_timeout_ms: 5000,
        }
    }
}

/// Allow-list source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowListConfig {
    /// Path to the allow-list JSON file.
    pub path: String,
    /// Snapshot refresh interval in seconds; 0 re-reads on every lookup.
    pub refresh_secs: u64,
}

impl Default for AllowListConfig {
    fn default() -> Self {
        Self {
            path: "allowed_tickers.json".to_string(),
            refresh_secs: 0,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.store.url.is_empty() {
            return Err(ConfigError::InvalidValue(
                "store url cannot be empty".to_string(),
            ));
        }
        if self.store.key_prefix.is_empty() {
            return Err(ConfigError::InvalidValue(
                "store key_prefix cannot be empty".to_string(),
            ));
        }
        if self.store.fetch_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "store fetch_timeout_ms must be positive".to_string(),
            ));
        }
        if self.allow_list.path.is_empty() {
            return Err(ConfigError::InvalidValue(
                "allow_list path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 3000

[store]
url = "redis://localhost:6379/1"
key_prefix = "option"
fetch_timeout_ms = 2500

[allow_list]
path = "allowed.json"
refresh_secs = 30
"#;

        let config = Config::parse(toml_content).expect("should parse");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.url, "redis://localhost:6379/1");
        assert_eq!(config.store.key_prefix, "option");
        assert_eq!(config.store.fetch_timeout_ms, 2500);
        assert_eq!(config.allow_list.path, "allowed.json");
        assert_eq!(config.allow_list.refresh_secs, 30);
    }

    #[test]
    fn test_parse_config_defaults() {
        let config = Config::parse("").expect("empty config uses defaults");
        assert_eq!(config.server.port, 8001);
        assert_eq!(config.store.key_prefix, "option");
        assert_eq!(config.allow_list.refresh_secs, 0);
    }

    #[test]
    fn test_validation_zero_timeout() {
        let toml_content = r#"
[store]
url = "redis://localhost:6379/0"
key_prefix = "option"
fetch_timeout_ms = 0
"#;
        assert!(Config::parse(toml_content).is_err());
    }

    #[test]
    fn test_validation_empty_allow_list_path() {
        let toml_content = r#"
[allow_list]
path = ""
refresh_secs = 0
"#;
        assert!(Config::parse(toml_content).is_err());
    }
}
