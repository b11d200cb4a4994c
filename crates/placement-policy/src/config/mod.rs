//! Process configuration read from the environment (and an optional `.env` file).

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Deployment stage the service runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    #[default]
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub roster: RosterConfig,
}

impl AppConfig {
    /// Read `APP_ENV`, `APP_HOST`, `APP_PORT`, `APP_LOG_LEVEL` and the roster file locations.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = env_value("APP_ENV")
            .map(|value| AppEnvironment::parse(&value))
            .unwrap_or_default();

        let port = match env_value("APP_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => DEFAULT_PORT,
        };

        let server = ServerConfig {
            host: env_value("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        };
        let telemetry = TelemetryConfig {
            log_level: env_value("APP_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        };
        let roster = RosterConfig {
            students_path: env_value("PLACEMENT_STUDENTS_FILE").map(PathBuf::from),
            companies_path: env_value("PLACEMENT_COMPANIES_FILE").map(PathBuf::from),
        };

        Ok(Self {
            environment,
            server,
            telemetry,
            roster,
        })
    }
}

/// Trimmed value of an environment variable; unset and blank are both `None`.
fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse::<IpAddr>()
                .map_err(|source| ConfigError::InvalidHost {
                    value: self.host.clone(),
                    source,
                })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Fallback `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
}

/// Optional roster files used to seed the in-memory collaborators.
///
/// When a path is absent the service falls back to its bundled sample roster.
#[derive(Debug, Clone, Default)]
pub struct RosterConfig {
    pub students_path: Option<PathBuf>,
    pub companies_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a port number between 0 and 65535 (found '{value}')")]
    InvalidPort { value: String },
    #[error("APP_HOST must be an IPv4/IPv6 address or 'localhost' (found '{value}')")]
    InvalidHost {
        value: String,
        source: std::net::AddrParseError,
    },
}
