use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use chrono::Duration;

use crate::screening::{
    GuidanceNamespace, UnknownNamespace, DEFAULT_SESSION_CAPACITY, DEFAULT_SESSION_TTL_SECS,
};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the screening service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub screening: ScreeningConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let guidance_namespace = match env::var("SCREENER_GUIDANCE_NAMESPACE") {
            Ok(raw) => raw
                .parse::<GuidanceNamespace>()
                .map_err(|source| ConfigError::InvalidGuidanceNamespace { source })?,
            Err(_) => GuidanceNamespace::default(),
        };

        let session_capacity = match env::var("SCREENER_SESSION_CAPACITY") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => return Err(ConfigError::InvalidSessionCapacity),
            },
            Err(_) => DEFAULT_SESSION_CAPACITY,
        };

        let session_ttl_secs = match env::var("SCREENER_SESSION_TTL_SECS") {
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidSessionTtl),
            },
            Err(_) => DEFAULT_SESSION_TTL_SECS,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            screening: ScreeningConfig {
                guidance_namespace,
                session_capacity,
                session_ttl: Duration::seconds(i64::from(session_ttl_secs)),
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Screening behavior: which guidance keys to issue, how many live sessions to hold
/// and how long an untouched session is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreeningConfig {
    pub guidance_namespace: GuidanceNamespace,
    pub session_capacity: usize,
    pub session_ttl: Duration,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            guidance_namespace: GuidanceNamespace::default(),
            session_capacity: DEFAULT_SESSION_CAPACITY,
            session_ttl: Duration::seconds(i64::from(DEFAULT_SESSION_TTL_SECS)),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidGuidanceNamespace { source: UnknownNamespace },
    InvalidSessionCapacity,
    InvalidSessionTtl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidGuidanceNamespace { source } => {
                write!(f, "SCREENER_GUIDANCE_NAMESPACE is invalid: {source}")
            }
            ConfigError::InvalidSessionCapacity => {
                write!(f, "SCREENER_SESSION_CAPACITY must be a positive integer")
            }
            ConfigError::InvalidSessionTtl => {
                write!(f, "SCREENER_SESSION_TTL_SECS must be a positive number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidSessionCapacity
            | ConfigError::InvalidSessionTtl => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidGuidanceNamespace { source } => Some(source),
        }
    }
}
