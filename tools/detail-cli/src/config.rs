//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use detail_commerce::Currency;
use detail_observability::LogConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding `api.base_url`.
pub const ENV_API_URL: &str = "DETAIL_API_URL";
/// Environment variable overriding `api.timeout_ms`.
pub const ENV_API_TIMEOUT_MS: &str = "DETAIL_API_TIMEOUT_MS";
/// Environment variable overriding `api.image_host`.
pub const ENV_IMAGE_HOST: &str = "DETAIL_IMAGE_HOST";
/// Environment variable overriding `storage.dir`.
pub const ENV_STORAGE_DIR: &str = "DETAIL_STORAGE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a number of milliseconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("unsupported currency: {0}")]
    UnknownCurrency(String),
}

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Backend configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Store presentation.
    #[serde(default)]
    pub store: StoreConfig,

    /// Local storage for the session and cart.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LogConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Apply `DETAIL_*` environment overrides.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Some(value) = lookup(ENV_API_TIMEOUT_MS) {
            let parsed = value.trim().parse().ok();
            self.api.timeout_ms = parsed.ok_or(ConfigError::InvalidTimeout {
                var: ENV_API_TIMEOUT_MS,
                value,
            })?;
        }
        if let Some(host) = lookup(ENV_IMAGE_HOST) {
            self.api.image_host = host;
        }
        if let Some(dir) = lookup(ENV_STORAGE_DIR) {
            self.storage.dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }
}

/// Backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total timeout per request in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Host prefixed to relative image paths.
    #[serde(default = "default_image_host")]
    pub image_host: String,
}

fn default_base_url() -> String {
    "http://localhost:9090/api".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_image_host() -> String {
    "http://localhost:9090".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            image_host: default_image_host(),
        }
    }
}

/// Store presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Currency code prices are shown in.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    Currency::INR.code().to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

impl StoreConfig {
    pub fn currency(&self) -> Result<Currency, ConfigError> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }
}

/// Local storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the session and cart (default: ~/.local/share/detailgreek).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Generate a default config file.
pub fn generate_default_config() -> String {
    r#"# DetailGreek storefront configuration

[api]
base_url = "http://localhost:9090/api"
timeout_ms = 10000
image_host = "http://localhost:9090"

[store]
currency = "INR"

[storage]
# dir = "/path/to/storage"

[logging]
level = "info"
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_parses() {
        let config: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.store.currency().unwrap(), Currency::INR);
    }

    #[test]
    fn test_partial_config() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://shop.example.com/api"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.storage.dir, None);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "http://api.test/api"),
            (ENV_API_TIMEOUT_MS, " 2500 "),
            (ENV_STORAGE_DIR, "/tmp/dg"),
        ]
        .into_iter()
        .collect();

        let mut config = StorefrontConfig::default();
        config
            .apply_overrides(|var| env.get(var).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.api.base_url, "http://api.test/api");
        assert_eq!(config.api.timeout_ms, 2500);
        assert_eq!(config.api.image_host, "http://localhost:9090");
        assert_eq!(config.storage.dir, Some(PathBuf::from("/tmp/dg")));
    }

    #[test]
    fn test_bad_timeout_override() {
        let mut config = StorefrontConfig::default();
        let result = config.apply_overrides(|var| {
            (var == ENV_API_TIMEOUT_MS).then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
    }

    #[test]
    fn test_unknown_currency() {
        let store = StoreConfig {
            currency: "XYZ".into(),
        };
        assert!(matches!(store.currency(), Err(ConfigError::UnknownCurrency(_))));
    }
}
