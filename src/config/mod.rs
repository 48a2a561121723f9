use std::env;

use thiserror::Error;

use crate::auth::DEFAULT_EXPIRY_HOURS;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DATABASE: &str = "shoppin";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Signing secret for issued tokens; may be empty, in which case the
    /// server refuses to start
    pub token_secret: String,
    pub token_expiry_hours: u64,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let server = ServerConfig {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?,
        };

        let database = DatabaseConfig {
            uri: lookup("MONGODB_URI")
                .filter(|uri| !uri.trim().is_empty())
                .ok_or(ConfigError::Missing("MONGODB_URI"))?,
            name: lookup("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        };

        let security = SecurityConfig {
            token_secret: lookup("ACCESS_TOKEN_SECRET").unwrap_or_default(),
            token_expiry_hours: parse_or(
                "TOKEN_EXPIRY_HOURS",
                lookup("TOKEN_EXPIRY_HOURS"),
                DEFAULT_EXPIRY_HOURS,
            )?,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        };

        Ok(Self {
            environment,
            server,
            database,
            security,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self.environment {
            Environment::Development => "shoppin_api=debug,tower_http=debug",
            Environment::Staging | Environment::Production => "shoppin_api=info,tower_http=info",
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_uri_is_set() {
        let config = config_from(&[("MONGODB_URI", "mongodb://localhost:27017")]).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.name, "shoppin");
        assert_eq!(config.security.token_expiry_hours, 6);
        assert!(config.security.token_secret.is_empty());
        assert!(config.security.cors_origins.is_empty());
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("APP_ENV", "production"),
            ("MONGODB_URI", "mongodb://db:27017"),
            ("MONGODB_DATABASE", "catalog"),
            ("PORT", "8080"),
            ("ACCESS_TOKEN_SECRET", "shh"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
        ])
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.name, "catalog");
        assert_eq!(config.security.token_secret, "shh");
        assert_eq!(
            config.security.cors_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.default_log_filter(), "shoppin_api=info,tower_http=info");
    }

    #[test]
    fn missing_uri_is_an_error() {
        assert_eq!(config_from(&[]).unwrap_err(), ConfigError::Missing("MONGODB_URI"));
        assert_eq!(
            config_from(&[("MONGODB_URI", "  ")]).unwrap_err(),
            ConfigError::Missing("MONGODB_URI")
        );
    }

    #[test]
    fn malformed_port_is_an_error() {
        let err = config_from(&[("MONGODB_URI", "mongodb://x"), ("PORT", "http")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "PORT",
                value: "http".to_string()
            }
        );
    }
}
