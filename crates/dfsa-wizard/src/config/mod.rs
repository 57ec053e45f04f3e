use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::fs_application::{RuleSet, VisibilityEngine, DEFAULT_MAX_DRAFTS};

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

/// Top-level configuration for the wizard service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub drafts: DraftConfig,
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

        let max_drafts = match env::var("APP_MAX_DRAFTS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidDraftLimit)?,
            Err(_) => DEFAULT_MAX_DRAFTS,
        };

        let rules_path = env::var("APP_VISIBILITY_RULES")
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            drafts: DraftConfig {
                max_drafts,
                rules_path,
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

/// Draft store sizing and the optional visibility rule file.
#[derive(Debug, Clone)]
pub struct DraftConfig {
    pub max_drafts: usize,
    pub rules_path: Option<PathBuf>,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            max_drafts: DEFAULT_MAX_DRAFTS,
            rules_path: None,
        }
    }
}

impl DraftConfig {
    /// Built-in visibility unless a rule file is configured.
    pub fn visibility_engine(&self) -> Result<VisibilityEngine, ConfigError> {
        let Some(path) = &self.rules_path else {
            return Ok(VisibilityEngine::BuiltIn);
        };

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::RulesUnreadable {
            path: path.clone(),
            source,
        })?;
        let rules = RuleSet::from_json(&raw).map_err(|source| ConfigError::RulesInvalid {
            path: path.clone(),
            source,
        })?;

        Ok(VisibilityEngine::Configured(rules))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidDraftLimit,
    RulesUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    RulesInvalid {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidDraftLimit => {
                write!(f, "APP_MAX_DRAFTS must be a positive integer")
            }
            ConfigError::RulesUnreadable { path, .. } => {
                write!(f, "unable to read visibility rules at {}", path.display())
            }
            ConfigError::RulesInvalid { path, .. } => {
                write!(f, "visibility rules at {} are not valid JSON rules", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidDraftLimit => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::RulesUnreadable { source, .. } => Some(source),
            ConfigError::RulesInvalid { source, .. } => Some(source),
        }
    }
}
