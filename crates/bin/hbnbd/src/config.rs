//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `hbnb.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Storage backend selection.
    pub storage: StorageConfig,
    /// Cross-origin settings.
    pub cors: CorsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Which storage implementation backs the registry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Single JSON file.
    #[default]
    File,
    /// `SQLite` database.
    Db,
}

/// Storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// JSON document used by the file backend.
    pub file_path: PathBuf,
    /// `SQLite` connection URL used by the database backend.
    pub database_url: String,
}

/// CORS configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the API. `*` allows any origin.
    pub allowed_origins: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `hbnb.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("hbnb.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(val) = env("HBNB_API_HOST") {
            self.server.host = val;
        }
        if let Some(val) = env("HBNB_API_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Some(val) = env("HBNB_TYPE_STORAGE") {
            self.storage.backend = if val == "db" {
                StorageBackend::Db
            } else {
                StorageBackend::File
            };
        }
        if let Some(val) = env("HBNB_FILE_PATH") {
            self.storage.file_path = PathBuf::from(val);
        }
        if let Some(val) = env("HBNB_DATABASE_URL") {
            self.storage.database_url = val;
        }
        if let Some(val) = env("HBNB_CORS_ORIGINS") {
            self.cors.allowed_origins = val
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(val) = env("HBNB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = env("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.storage.backend == StorageBackend::File
            && self.storage.file_path.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "file_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            file_path: PathBuf::from("file.json"),
            database_url: "sqlite:hbnb.db?mode=rwc".to_string(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["0.0.0.0".to_string()],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hbnbd=info,hbnb=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.file_path, PathBuf::from("file.json"));
        assert_eq!(config.storage.database_url, "sqlite:hbnb.db?mode=rwc");
        assert_eq!(config.cors.allowed_origins, vec!["0.0.0.0"]);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [storage]
            backend = 'db'
            file_path = 'data.json'
            database_url = 'sqlite:test.db'

            [cors]
            allowed_origins = ['http://localhost:3000']

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage.backend, StorageBackend::Db);
        assert_eq!(config.storage.file_path, PathBuf::from("data.json"));
        assert_eq!(config.storage.database_url, "sqlite:test.db");
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[
            ("HBNB_API_HOST", "127.0.0.1"),
            ("HBNB_API_PORT", "8080"),
            ("HBNB_TYPE_STORAGE", "db"),
            ("HBNB_DATABASE_URL", "sqlite::memory:"),
            ("HBNB_CORS_ORIGINS", "http://a.io, http://b.io,"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.storage.backend, StorageBackend::Db);
        assert_eq!(config.storage.database_url, "sqlite::memory:");
        assert_eq!(config.cors.allowed_origins, vec!["http://a.io", "http://b.io"]);
    }

    #[test]
    fn should_fall_back_to_file_backend_for_unknown_storage_type() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Db;
        config.apply_env_overrides(env(&[("HBNB_TYPE_STORAGE", "mongo")]));
        assert_eq!(config.storage.backend, StorageBackend::File);
    }

    #[test]
    fn should_ignore_unparsable_port() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("HBNB_API_PORT", "http")]));
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn should_prefer_rust_log_over_hbnb_log() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("HBNB_LOG", "warn")]));
        assert_eq!(config.logging.filter, "warn");

        config.apply_env_overrides(env(&[("HBNB_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_file_path_for_file_backend() {
        let mut config = Config::default();
        config.storage.file_path = PathBuf::new();
        assert!(config.validate().is_err());

        config.storage.backend = StorageBackend::Db;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
