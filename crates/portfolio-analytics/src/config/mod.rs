use crate::analytics::lease_terms::{MissingRsfPolicy, DEFAULT_BUILDING_RSF};
use crate::analytics::stacking::StackingConfig;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub analytics: AnalyticsConfig,
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

        let data_dir = env::var("PORTFOLIO_DATA_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let missing_rsf = match env::var("PORTFOLIO_MISSING_RSF") {
            Ok(value) => parse_missing_rsf(&value)?,
            Err(_) => MissingRsfPolicy::default(),
        };

        let stacking_seed = match env::var("STACKING_SEED") {
            Ok(value) if !value.trim().is_empty() => Some(
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed { value })?,
            ),
            _ => None,
        };

        let stacking = match env::var("STACKING_CONFIG") {
            Ok(path) if !path.trim().is_empty() => load_stacking_config(path.trim())?,
            _ => StackingConfig::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            analytics: AnalyticsConfig {
                data_dir,
                missing_rsf,
                stacking_seed,
                stacking,
            },
        })
    }
}

/// Reads stacking tunables from a JSON file; omitted fields keep their
/// defaults.
fn load_stacking_config(path: &str) -> Result<StackingConfig, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidStackingConfig {
        path: path.to_string(),
        reason,
    };
    let raw = std::fs::read_to_string(path).map_err(|err| invalid(err.to_string()))?;
    serde_json::from_str(&raw).map_err(|err| invalid(err.to_string()))
}

fn parse_missing_rsf(value: &str) -> Result<MissingRsfPolicy, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(MissingRsfPolicy::UseDefault(DEFAULT_BUILDING_RSF));
    }
    if trimmed.eq_ignore_ascii_case("exclude") {
        return Ok(MissingRsfPolicy::Exclude);
    }

    trimmed
        .replace('_', "")
        .parse::<u64>()
        .map(MissingRsfPolicy::UseDefault)
        .map_err(|_| ConfigError::InvalidMissingRsf {
            value: value.to_string(),
        })
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Data source and defaults for the portfolio analytics.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsConfig {
    /// Directory holding `buildings.csv` / `leases.csv`; the built-in sample
    /// portfolio is used when unset.
    pub data_dir: Option<PathBuf>,
    pub missing_rsf: MissingRsfPolicy,
    pub stacking_seed: Option<u64>,
    pub stacking: StackingConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMissingRsf { value: String },
    InvalidSeed { value: String },
    InvalidStackingConfig { path: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMissingRsf { value } => write!(
                f,
                "PORTFOLIO_MISSING_RSF must be 'exclude' or a square footage, got '{}'",
                value
            ),
            ConfigError::InvalidSeed { value } => {
                write!(f, "STACKING_SEED must be a valid u64, got '{}'", value)
            }
            ConfigError::InvalidStackingConfig { path, reason } => {
                write!(f, "STACKING_CONFIG '{}' could not be loaded: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidMissingRsf { .. }
            | ConfigError::InvalidSeed { .. }
            | ConfigError::InvalidStackingConfig { .. } => None,
        }
    }
}
