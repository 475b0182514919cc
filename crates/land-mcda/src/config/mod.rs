use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::decision::{MissingScorePolicy, ScoringConfig};

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
    pub decision: DecisionConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            decision: DecisionConfig::from_env()?,
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

/// Scoring policy and history presentation defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionConfig {
    pub scoring: ScoringConfig,
    /// Number of scenarios returned when a history listing gives no limit.
    pub recent_scenarios: usize,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            recent_scenarios: 3,
        }
    }
}

impl DecisionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let missing_score = match env::var("MCDA_MISSING_SCORE") {
            Ok(raw) => MissingScorePolicy::parse(&raw)
                .ok_or(ConfigError::InvalidMissingScorePolicy { value: raw })?,
            Err(_) => defaults.scoring.missing_score,
        };

        let enforce_weight_sum = match env::var("MCDA_ENFORCE_WEIGHT_SUM") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "MCDA_ENFORCE_WEIGHT_SUM",
                value: raw,
            })?,
            Err(_) => defaults.scoring.enforce_weight_sum,
        };

        let recent_scenarios = match env::var("MCDA_RECENT_SCENARIOS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidRecentScenarios)?,
            Err(_) => defaults.recent_scenarios,
        };

        Ok(Self {
            scoring: ScoringConfig {
                missing_score,
                enforce_weight_sum,
            },
            recent_scenarios,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMissingScorePolicy { value: String },
    InvalidFlag { name: &'static str, value: String },
    InvalidRecentScenarios,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMissingScorePolicy { value } => write!(
                f,
                "MCDA_MISSING_SCORE must be 'zero' or 'reject' (got '{value}')"
            ),
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be a boolean flag (got '{value}')")
            }
            ConfigError::InvalidRecentScenarios => {
                write!(f, "MCDA_RECENT_SCENARIOS must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidMissingScorePolicy { .. }
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidRecentScenarios => None,
        }
    }
}

/// Serializes tests that mutate process environment variables.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    static GUARD: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    GUARD.get_or_init(|| std::sync::Mutex::new(()))
}
