//! Structured logging setup over `tracing-subscriber`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Crates whose events the configured level applies to. Everything else
/// logs at `warn` and above.
const STOREFRONT_TARGETS: &[&str] = &[
    "detail",
    "detail_auth",
    "detail_cache",
    "detail_commerce",
    "detail_data",
    "detail_gateway",
];

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(LoggingError::UnknownLevel(other.to_string())),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line (for log aggregation).
    Json,
    /// Human-readable format (for terminals).
    #[default]
    Human,
}

/// Logging settings, usually read from the `[logging]` config section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl LogConfig {
    /// Filter directives for this config. `RUST_LOG`, when set, wins.
    pub fn directives(&self) -> String {
        let level = self.level.as_str();
        std::iter::once("warn".to_string())
            .chain(STOREFRONT_TARGETS.iter().map(|t| format!("{t}={level}")))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn filter(&self) -> Result<EnvFilter, LoggingError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(self.directives())
                .map_err(|e| LoggingError::Filter(e.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unknown log level: {0}")]
    UnknownLevel(String),

    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("a global logger is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean.
pub fn init(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = config.filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.try_init(),
    };
    result.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
        assert!(LogLevel::Error > LogLevel::Info);
    }

    #[test]
    fn test_directives() {
        let config = LogConfig {
            level: LogLevel::Debug,
            format: LogFormat::Human,
        };
        let directives = config.directives();
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("detail_gateway=debug"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_config_deserialize() {
        let config: LogConfig =
            serde_json::from_str(r#"{ "level": "warn", "format": "json" }"#).unwrap();
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(
            serde_json::from_str::<LogConfig>("{}").unwrap(),
            LogConfig::default()
        );
    }

    #[test]
    fn test_second_init_is_reported() {
        let config = LogConfig::default();
        let _ = init(&config);
        let second = init(&config);
        assert!(matches!(second, Err(LoggingError::AlreadyInitialized(_))));
    }
}
