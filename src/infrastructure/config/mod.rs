use serde::{Deserialize, Serialize};
use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

/// Runtime mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    Local,
    Production,
}

impl std::fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for RuntimeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!("Invalid runtime mode: {s}. Valid values: local, production")),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub mode: RuntimeMode,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: u64, // bytes
    pub request_timeout_seconds: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
}

/// Session cookie and store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_days: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub filter: Option<String>,
    pub format: LogFormat,
    pub slow_request_threshold_ms: u64,
    pub log_request_headers: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl AppConfig {
    /// Load configuration based on runtime mode
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn load() -> Result<Self, config::ConfigError> {
        // Detect runtime mode from environment (default: local)
        let mode = std::env::var("RUN_MODE")
            .unwrap_or_else(|_| "local".to_string())
            .parse::<RuntimeMode>()
            .map_err(config::ConfigError::Message)?;

        Self::load_for_mode(mode)
    }

    /// Load configuration for a specific runtime mode.
    ///
    /// Environment variables use the `FILM_LIBRARY_` prefix and `__` between
    /// nested keys, e.g. `FILM_LIBRARY_SERVER__PORT=8080`.
    pub fn load_for_mode(mode: RuntimeMode) -> Result<Self, config::ConfigError> {
        // Local overrides are plain env files; production relies on the environment alone
        if mode == RuntimeMode::Local {
            dotenvy::from_filename(".env.local").ok();
        }

        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("FILM_LIBRARY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let log_format = match mode {
            RuntimeMode::Local => "pretty",
            RuntimeMode::Production => "json",
        };

        let settings = builder
            .set_default("mode", mode.to_string())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.max_body_size", 1_048_576)? // 1MB
            .set_default("server.request_timeout_seconds", 30)?
            .set_default("database.url", "")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_seconds", 30)?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.database", "film_library")?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "")?
            .set_default("database.run_migrations", true)?
            .set_default("redis.url", "redis://127.0.0.1:6379")?
            .set_default("session.cookie_name", "session_id")?
            .set_default("session.ttl_days", 30)?
            .set_default("logging.level", "info")?
            .set_default("logging.filter", None::<String>)?
            .set_default("logging.format", log_format)?
            .set_default("logging.slow_request_threshold_ms", 1000)?
            .set_default("logging.log_request_headers", mode == RuntimeMode::Local)?
            .build()?;

        settings.try_deserialize()
    }
}

impl ServerConfig {
    /// Get the socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn body_limit(&self) -> usize {
        usize::try_from(self.max_body_size).unwrap_or(usize::MAX)
    }
}

impl DatabaseConfig {
    /// Get the `PostgreSQL` connection URL
    ///
    /// If url is provided, use it directly. Otherwise, construct from components.
    #[must_use]
    pub fn connection_url(&self) -> String {
        if self.url.is_empty() {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.database
            )
        } else {
            self.url.clone()
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.ttl_days) * 24 * 60 * 60)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { cookie_name: "session_id".to_string(), ttl_days: 30 }
    }
}

impl LoggingConfig {
    /// Filter directive handed to `EnvFilter` when `RUST_LOG` is unset
    pub fn filter_directive(&self) -> String {
        self.filter
            .clone()
            .unwrap_or_else(|| format!("film_library={},tower_http=info", self.level))
    }
}
