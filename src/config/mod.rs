//! Quill configuration
//!
//! Loaded from a JSON file (every field optional) and then overridden from the
//! environment:
//!
//! | Variable       | Field                  |
//! |----------------|------------------------|
//! | `SECRET_KEY`   | `auth.secret_key`      |
//! | `DATABASE_URL` | `database.url`         |
//! | `QUILL_HOST`   | `server.host`          |
//! | `QUILL_PORT`   | `server.port`          |

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use axum::http::HeaderValue;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::JwtConfig;
use crate::http_server::HttpServerConfig;

/// Development-only signing key. `start` warns when it is still in use.
pub const DEFAULT_SECRET_KEY: &str = "your_secret_key";

/// Longest accepted access token lifetime: one year
pub const MAX_ACCESS_TOKEN_MINUTES: i64 = 365 * 24 * 60;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuillConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx SQLite URL (default: "sqlite://quill.db?mode=rwc")
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Pool size (default: 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Token signing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    #[serde(default = "default_secret_key")]
    pub secret_key: String,

    /// Access token lifetime in minutes (default: 30)
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: i64,
}

fn default_database_url() -> String {
    "sqlite://quill.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_secret_key() -> String {
    DEFAULT_SECRET_KEY.to_string()
}

fn default_access_token_minutes() -> i64 {
    30
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
            access_token_minutes: default_access_token_minutes(),
        }
    }
}

impl AuthConfig {
    /// Token manager settings derived from this section
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.secret_key.clone(),
            access_token_ttl: Duration::minutes(self.access_token_minutes),
        }
    }

    /// Whether the built-in development secret is still configured
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl QuillConfig {
    /// Load from `path`, then apply environment overrides.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Load from `path`, taking overrides from `lookup` instead of the environment
    pub fn load_with<F>(path: &Path, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match fs::read_to_string(path) {
            Ok(content) => Self::from_json(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup("SECRET_KEY") {
            self.auth.secret_key = secret;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(host) = lookup("QUILL_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("QUILL_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "QUILL_PORT",
                message: format!("'{}' is not a port number", port),
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.auth.secret_key.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "auth.secret_key",
                message: "must not be empty".to_string(),
            });
        }
        if !(1..=MAX_ACCESS_TOKEN_MINUTES).contains(&self.auth.access_token_minutes) {
            return Err(ConfigError::InvalidValue {
                key: "auth.access_token_minutes",
                message: format!("must be between 1 and {}", MAX_ACCESS_TOKEN_MINUTES),
            });
        }
        for origin in &self.server.cors_origins {
            let well_formed = (origin.starts_with("http://") || origin.starts_with("https://"))
                && HeaderValue::from_str(origin).is_ok();
            if !well_formed {
                return Err(ConfigError::InvalidValue {
                    key: "server.cors_origins",
                    message: format!("'{}' is not an http(s) origin", origin),
                });
            }
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "database.max_connections",
                message: "must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = QuillConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.auth.access_token_minutes, 30);
        assert!(config.auth.uses_default_secret());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = QuillConfig::from_json(r#"{"auth": {"secret_key": "s3cret"}}"#).unwrap();
        assert_eq!(config.auth.secret_key, "s3cret");
        assert_eq!(config.auth.access_token_minutes, 30);
        assert_eq!(config.database.url, "sqlite://quill.db?mode=rwc");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SECRET_KEY", "from-env"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("QUILL_PORT", "9090"),
        ]
        .into_iter()
        .collect();

        let mut config = QuillConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.auth.secret_key, "from-env");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_bad_port_override() {
        let mut config = QuillConfig::default();
        let result = config.apply_overrides(|key| (key == "QUILL_PORT").then(|| "http".to_string()));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: "QUILL_PORT",
                ..
            })
        ));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = QuillConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.auth.access_token_minutes, 30);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quill.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(QuillConfig::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_rejects_non_positive_ttl() {
        let config =
            QuillConfig::from_json(r#"{"auth": {"access_token_minutes": 0}}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_caps_ttl() {
        let config = QuillConfig::from_json(r#"{"auth": {"access_token_minutes": 1000000000000}}"#)
            .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                key: "auth.access_token_minutes",
                ..
            })
        ));

        let mut config = QuillConfig::default();
        config.auth.access_token_minutes = MAX_ACCESS_TOKEN_MINUTES;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed_cors_origin() {
        for origin in ["*", "localhost:5173", "http://bad\nhost"] {
            let mut config = QuillConfig::default();
            config.server.cors_origins = vec![origin.to_string()];
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::InvalidValue {
                        key: "server.cors_origins",
                        ..
                    })
                ),
                "{origin} accepted"
            );
        }

        let mut config = QuillConfig::default();
        config.server.cors_origins = vec!["https://blog.example.com".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_with_ignores_process_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quill.json");
        fs::write(&path, r#"{"database": {"url": "sqlite://from-file.db"}}"#).unwrap();

        let config = QuillConfig::load_with(&path, |_| None).unwrap();
        assert_eq!(config.database.url, "sqlite://from-file.db");
    }

    #[test]
    fn test_jwt_config() {
        let auth = AuthConfig {
            secret_key: "k".to_string(),
            access_token_minutes: 15,
        };
        let jwt = auth.jwt_config();
        assert_eq!(jwt.secret, "k");
        assert_eq!(jwt.access_token_ttl, Duration::minutes(15));
    }
}
