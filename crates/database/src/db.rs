use log::LevelFilter;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::env;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Whether sea-orm logs every statement at debug level
    pub sql_logging: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = var("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(value) => match value.trim().parse() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DATABASE_MAX_CONNECTIONS",
                        value,
                    });
                }
            },
        };

        let sql_logging = match var("DATABASE_SQL_LOGGING") {
            None => false,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DATABASE_SQL_LOGGING",
                        value,
                    });
                }
            },
        };

        Ok(Self {
            url,
            max_connections,
            sql_logging,
        })
    }
}

/// Creates a database connection pool owned by the caller
pub async fn create_connection(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(config.sql_logging)
        .sqlx_logging_level(LevelFilter::Debug);

    log::debug!(
        "connecting to the database with up to {} connections",
        config.max_connections
    );
    Database::connect(options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            DatabaseConfig::from_vars(vars(&[("DATABASE_URL", "postgres://localhost/enrollment")]))
                .unwrap();

        assert_eq!(config.url, "postgres://localhost/enrollment");
        assert_eq!(config.max_connections, 10);
        assert!(!config.sql_logging);
    }

    #[test]
    fn test_overrides() {
        let config = DatabaseConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://db/enrollment"),
            ("DATABASE_MAX_CONNECTIONS", "32"),
            ("DATABASE_SQL_LOGGING", "true"),
        ]))
        .unwrap();

        assert_eq!(config.max_connections, 32);
        assert!(config.sql_logging);
    }

    #[test]
    fn test_missing_url() {
        assert_eq!(
            DatabaseConfig::from_vars(vars(&[])),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
    }

    #[test]
    fn test_invalid_values() {
        let err = DatabaseConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://db/enrollment"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                ..
            }
        ));

        let err = DatabaseConfig::from_vars(vars(&[
            ("DATABASE_URL", "postgres://db/enrollment"),
            ("DATABASE_SQL_LOGGING", "maybe"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "DATABASE_SQL_LOGGING has an invalid value \"maybe\"");
    }
}
