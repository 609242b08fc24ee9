//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use detail_auth::AuthSession;
use detail_cache::Cache;
use detail_commerce::cart::{CartPersistence, CartStore};
use detail_commerce::catalog::NormalizeContext;
use detail_data::{FetchClient, ReqwestTransport, TimeoutConfig};
use detail_gateway::ProductGateway;

use crate::config::StorefrontConfig;
use crate::output::Output;

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["detail.toml", ".detail.toml", "detail.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Customer session.
    pub auth: AuthSession,
    /// Catalog reads.
    pub gateway: ProductGateway,
    /// The saved cart.
    pub cart: CartStore,
}

impl Context {
    /// Load the configuration: an explicit file, or the first one found
    /// walking up from the working directory, then `DETAIL_*` overrides.
    ///
    /// Touches nothing but the config file, so logging can be set up from
    /// the result before any storage or network work starts.
    pub fn load_config(config_path: Option<&str>) -> Result<(StorefrontConfig, Option<PathBuf>)> {
        let (mut config, config_path) = if let Some(path) = config_path {
            (StorefrontConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };
        config.apply_env()?;
        Ok((config, config_path))
    }

    /// Open storage and wire up the session, gateway, and cart.
    pub fn build(
        config: StorefrontConfig,
        config_path: Option<PathBuf>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        let currency = config.store.currency()?;
        let storage_dir = config.storage.dir.clone().unwrap_or_else(default_storage_dir);
        let cache = Cache::open(&storage_dir)
            .with_context(|| format!("Failed to open storage at {}", storage_dir.display()))?;

        let transport = ReqwestTransport::new(TimeoutConfig::from_millis(config.api.timeout_ms))
            .context("Failed to create HTTP client")?;
        let client = FetchClient::new(transport)
            .with_base_url(&config.api.base_url)
            .with_timeout(Duration::from_millis(config.api.timeout_ms));

        let auth = AuthSession::new(client, cache.clone());
        let gateway = ProductGateway::http(
            auth.client().clone(),
            NormalizeContext::new(currency, &config.api.image_host),
        );
        let cart = CartPersistence::new(cache).into_store(currency);

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            auth,
            gateway,
            cart,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(StorefrontConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = StorefrontConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }
}

/// Get the platform-specific data directory.
fn default_storage_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share").join("detailgreek")
    } else {
        std::env::temp_dir().join("detailgreek")
    }
}

/// Context over a fresh storage directory, for command tests.
#[cfg(test)]
pub(crate) fn test_context(name: &str) -> (Context, PathBuf) {
    let dir = std::env::temp_dir().join(format!(
        "detail-cli-{name}-{}-{}",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    let mut config = StorefrontConfig::default();
    config.storage.dir = Some(dir.join("storage"));
    let ctx = Context::build(config, None, Output::new(false, true)).unwrap();
    (ctx, dir)
}
