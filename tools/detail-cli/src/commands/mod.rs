//! CLI command implementations.

pub mod account;
pub mod cart;
pub mod config;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Category name, e.g. "Interior Care".
    #[arg(long, conflicts_with = "category_id")]
    pub category: Option<String>,

    /// Backend category id.
    #[arg(long)]
    pub category_id: Option<String>,

    /// Sort order: featured, price-low, price-high, rating, name.
    #[arg(short, long, default_value = "featured")]
    pub sort: String,

    /// Filter: all, in-stock, featured, sale.
    #[arg(short, long, default_value = "all")]
    pub filter: String,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

/// Cart subcommands.
#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default).
    Show,

    /// Add one unit of a product.
    Add {
        /// Product id.
        id: String,
    },

    /// Set the quantity of a line. Zero removes it.
    Update {
        /// Product id.
        id: String,
        /// New quantity.
        quantity: u32,
    },

    /// Remove a line.
    Remove {
        /// Product id.
        id: String,
    },

    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted).
    #[arg(short, long)]
    pub email: Option<String>,

    /// Remember the email for the next sign-in.
    #[arg(short, long)]
    pub remember: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,

    /// Write a default detail.toml in the current directory.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },

    /// Print the path of the config file in use.
    Path,
}
