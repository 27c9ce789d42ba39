//! Configuration module for jarstore.

use serde::Deserialize;
use std::path::Path;

use crate::{JarstoreError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3241
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Folder storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory under which every folder lives.
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// The only file extension accepted on upload (without the dot).
    #[serde(default = "default_allowed_extension")]
    pub allowed_extension: String,
    /// Maximum number of files in a single upload request.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    /// Maximum upload request body in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_storage_root() -> String {
    "storage".to_string()
}

fn default_allowed_extension() -> String {
    "jar".to_string()
}

fn default_max_files() -> usize {
    100
}

fn default_max_upload_size() -> u64 {
    512
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
            allowed_extension: default_allowed_extension(),
            max_files: default_max_files(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

impl StorageConfig {
    /// Request body limit in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        (self.max_upload_size_mb as usize).saturating_mul(1024 * 1024)
    }
}

/// Shared-secret configuration for mutating endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Request header carrying the secret.
    #[serde(default = "default_auth_header")]
    pub header: String,
    /// Expected header value.
    #[serde(default = "default_auth_secret")]
    pub secret: String,
}

fn default_auth_header() -> String {
    "pass".to_string()
}

fn default_auth_secret() -> String {
    "fox".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            header: default_auth_header(),
            secret: default_auth_secret(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/jarstore.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Shared-secret configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(JarstoreError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| JarstoreError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `JARSTORE_SECRET`: Override the shared secret
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("JARSTORE_SECRET") {
            if !secret.is_empty() {
                self.auth.secret = secret;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.auth.secret.is_empty() {
            return Err(JarstoreError::Config(
                "auth.secret is empty. Set it in config.toml or via JARSTORE_SECRET.".to_string(),
            ));
        }
        if self.auth.header.is_empty() {
            return Err(JarstoreError::Config("auth.header is empty".to_string()));
        }
        if self.storage.allowed_extension.is_empty() {
            return Err(JarstoreError::Config(
                "storage.allowed_extension is empty".to_string(),
            ));
        }
        if self.storage.max_files == 0 {
            return Err(JarstoreError::Config(
                "storage.max_files must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3241);

        assert_eq!(config.storage.root, "storage");
        assert_eq!(config.storage.allowed_extension, "jar");
        assert_eq!(config.storage.max_files, 100);
        assert_eq!(config.storage.max_upload_size_mb, 512);

        assert_eq!(config.auth.header, "pass");
        assert_eq!(config.auth.secret, "fox");

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/jarstore.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[storage]
root = "/srv/jars"
allowed_extension = "zip"
max_files = 10
max_upload_size_mb = 64

[auth]
header = "x-pass"
secret = "badger"

[logging]
level = "debug"
file = "/var/log/jarstore.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.root, "/srv/jars");
        assert_eq!(config.storage.allowed_extension, "zip");
        assert_eq!(config.storage.max_files, 10);
        assert_eq!(config.storage.max_upload_size_mb, 64);
        assert_eq!(config.auth.header, "x-pass");
        assert_eq!(config.auth.secret, "badger");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "/var/log/jarstore.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 3000
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.secret, "fox");
        assert_eq!(config.storage.max_files, 100);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.port, 3241);
        assert_eq!(config.storage.root, "storage");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        if let Err(JarstoreError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(JarstoreError::Io(_))));
    }

    #[test]
    fn test_max_upload_bytes() {
        let storage = StorageConfig {
            max_upload_size_mb: 2,
            ..Default::default()
        };
        assert_eq!(storage.max_upload_bytes(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let mut config = Config::default();
        config.auth.secret = String::new();
        assert!(matches!(config.validate(), Err(JarstoreError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_max_files() {
        let mut config = Config::default();
        config.storage.max_files = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_extension() {
        let mut config = Config::default();
        config.storage.allowed_extension = String::new();
        assert!(config.validate().is_err());
    }
}
