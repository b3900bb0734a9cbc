//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with an environment variable
//! override for `DATABASE_URL`.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Main configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database URL or filesystem path.
    pub url: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// `DATABASE_URL` from the environment (or a `.env` file) overrides the
    /// `database.url` key when set.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        let _ = dotenvy::dotenv();
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                config.database.url = url;
            }
        }

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(ConfigError::MissingField { field: "url" }.into());
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_connections",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "format",
                    reason: format!("unknown log format '{other}'"),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Initialize the tracing subscriber with this configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "stockdata.db".into(),
            max_connections: default_max_connections(),
        }
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.url, "stockdata.db");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn parse_minimal_toml() {
        let config: Config = toml::from_str(
            r#"
[database]
url = "market.db"
"#,
        )
        .unwrap();
        assert_eq!(config.database.url, "market.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn validate_rejects_empty_url() {
        let config = Config {
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 5,
            },
            logging: LoggingConfig::default(),
        };
        assert!(matches!(
            config.validate(),
            Err(crate::error::Error::Config(ConfigError::MissingField {
                field: "url"
            }))
        ));
    }

    #[test]
    fn validate_rejects_unknown_format() {
        let config = Config {
            database: DatabaseConfig::default(),
            logging: LoggingConfig {
                level: "info".into(),
                format: "xml".into(),
            },
        };
        assert!(matches!(
            config.validate(),
            Err(crate::error::Error::Config(ConfigError::InvalidValue {
                field: "format",
                ..
            }))
        ));
    }

    #[test]
    fn validate_rejects_zero_pool_size() {
        let config = Config {
            database: DatabaseConfig {
                url: "market.db".into(),
                max_connections: 0,
            },
            logging: LoggingConfig::default(),
        };
        assert!(matches!(
            config.validate(),
            Err(crate::error::Error::Config(ConfigError::InvalidValue {
                field: "max_connections",
                ..
            }))
        ));
    }
}
