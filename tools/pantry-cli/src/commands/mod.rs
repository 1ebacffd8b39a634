//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product name (e.g., "Turmeric").
    pub name: String,

    /// Unit price in rupees.
    #[arg(short, long)]
    pub price: i64,

    /// Quantity to add.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..))]
    pub qty: i64,

    /// Size label; the line is named "<name> (<size>)".
    #[arg(short, long)]
    pub size: Option<String>,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Line name exactly as shown in the cart.
    pub name: String,
}

/// Arguments for the qty command.
#[derive(Args)]
pub struct QtyArgs {
    /// Line name exactly as shown in the cart.
    pub name: String,

    /// Signed change, e.g. 1 or -1.
    #[arg(allow_negative_numbers = true)]
    pub delta: i64,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Customer name.
    #[arg(long)]
    pub name: Option<String>,

    /// Customer phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Delivery address.
    #[arg(long)]
    pub address: Option<String>,

    /// Skip prompts; missing fields fall back to the saved customer.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Write a default pantry.toml in the current directory.
    Init {
        /// Shop name to put in the file.
        #[arg(long)]
        shop_name: Option<String>,

        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}
