use serde::Serialize;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseConfig {
    #[serde(skip_serializing)]
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub query_timeout_ms: u64,
    pub ensure_schema: bool,
}

impl AppConfig {
    /// Build the configuration from `APP_ENV` defaults plus individual overrides.
    ///
    /// `DATABASE_URL` is the only required variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL"))?;

        let config = match environment {
            Environment::Production => Self::production(database_url),
            Environment::Development => Self::development(database_url),
        };

        config.with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = parse_var("PORT", &v)?;
        }
        if let Ok(v) = env::var("LOG_LEVEL") {
            self.server.log_level = v;
        }

        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Ok(v) = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            self.database.acquire_timeout_secs = parse_var("DATABASE_ACQUIRE_TIMEOUT_SECS", &v)?;
        }
        if let Ok(v) = env::var("DATABASE_QUERY_TIMEOUT_MS") {
            self.database.query_timeout_ms = parse_var("DATABASE_QUERY_TIMEOUT_MS", &v)?;
        }
        if let Ok(v) = env::var("DATABASE_ENSURE_SCHEMA") {
            self.database.ensure_schema = parse_var("DATABASE_ENSURE_SCHEMA", &v)?;
        }

        Ok(self)
    }

    fn development(database_url: String) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                log_level: "debug".to_string(),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 5,
                acquire_timeout_secs: 3,
                query_timeout_ms: 3000,
                ensure_schema: true,
            },
        }
    }

    fn production(database_url: String) -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                log_level: "info".to_string(),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 20,
                acquire_timeout_secs: 3,
                query_timeout_ms: 3000,
                ensure_schema: true,
            },
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                name: "HOST",
                reason: e.to_string(),
            })
    }
}

impl DatabaseConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Connection string with any password replaced, for logging.
    pub fn redacted_url(&self) -> Result<String, ConfigError> {
        let mut url = url::Url::parse(&self.url).map_err(|e| ConfigError::InvalidValue {
            name: "DATABASE_URL",
            reason: e.to_string(),
        })?;
        if url.password().is_some() {
            // set_password only fails for cannot-be-a-base URLs, which have no password
            let _ = url.set_password(Some("***"));
        }
        Ok(url.into())
    }
}

fn parse_var<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name,
        reason: e.to_string(),
    })
}
