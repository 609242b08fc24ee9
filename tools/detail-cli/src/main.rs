//! DetailGreek CLI - browse the catalog and manage a cart from the terminal.
//!
//! Commands:
//! - `detail products` - List products, optionally by category
//! - `detail product` - Show one product
//! - `detail categories` - List categories
//! - `detail cart` - Show and change the cart
//! - `detail login` / `detail signup` / `detail logout` - Manage the session
//! - `detail whoami` - Show the signed-in customer
//! - `detail refresh` - Renew the session token
//! - `detail status` - Check the backend
//! - `detail config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use detail_observability::LogLevel;

use commands::{CartArgs, ConfigArgs, LoginArgs, ProductArgs, ProductsArgs};

/// DetailGreek CLI - Automotive detailing storefront
#[derive(Parser)]
#[command(name = "detail")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products(ProductsArgs),

    /// Show one product
    Product(ProductArgs),

    /// List categories
    Categories,

    /// Show and change the cart
    Cart(CartArgs),

    /// Sign in
    Login(LoginArgs),

    /// Create an account
    Signup,

    /// Sign out
    Logout,

    /// Show the signed-in customer
    Whoami,

    /// Renew the session token
    Refresh,

    /// Check the backend and the session
    Status,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config, then set up logging before storage and network work
    let (config, config_path) = context::Context::load_config(cli.config.as_deref())?;

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = LogLevel::Debug;
    }
    if let Err(e) = detail_observability::init(&logging) {
        output.warn(&format!("Logging disabled: {}", e));
    }

    let ctx = context::Context::build(config, config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::list(args, &ctx).await,
        Commands::Product(args) => commands::products::show(args, &ctx).await,
        Commands::Categories => commands::products::categories(&ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Login(args) => commands::account::login(args, &ctx).await,
        Commands::Signup => commands::account::signup(&ctx).await,
        Commands::Logout => commands::account::logout(&ctx).await,
        Commands::Whoami => commands::account::whoami(&ctx).await,
        Commands::Refresh => commands::account::refresh(&ctx).await,
        Commands::Status => commands::account::status(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_config_with_category_filter() {
        let cli = Cli::try_parse_from([
            "detail",
            "-c",
            "shop.toml",
            "products",
            "--category",
            "Interior Care",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("shop.toml"));
        match cli.command {
            Commands::Products(args) => {
                assert_eq!(args.category.as_deref(), Some("Interior Care"))
            }
            _ => panic!("expected products command"),
        }
    }

    #[test]
    fn test_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["detail", "products", "-c", "shop.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("shop.toml"));
    }
}
