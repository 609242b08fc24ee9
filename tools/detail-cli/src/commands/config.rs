//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Path => show_path(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    // Api section
    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output.kv("timeout_ms", &ctx.config.api.timeout_ms.to_string());
    ctx.output.kv("image_host", &ctx.config.api.image_host);

    // Store section
    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("currency", &ctx.config.store.currency);

    // Storage section
    ctx.output.info("");
    ctx.output.info("[storage]");
    match &ctx.config.storage.dir {
        Some(dir) => ctx.output.kv("dir", &dir.display().to_string()),
        None => ctx.output.kv("dir", "(default)"),
    }

    // Logging section
    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", ctx.config.logging.level.as_str());
    ctx.output.kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created {}", config_path.display()));
    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    let path = ctx.config_path.as_ref().map(|p| p.display().to_string());

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "path": path }));
        return Ok(());
    }

    match path {
        Some(path) => println!("{}", path),
        None => ctx.output.info("No config file found; using defaults and environment"),
    }
    Ok(())
}
