//! Pantry CLI - Shopping cart and checkout for the pantry storefront.
//!
//! Commands:
//! - `pantry add` - Add a product to the cart
//! - `pantry remove` - Remove a line from the cart
//! - `pantry qty` - Change a line's quantity
//! - `pantry show` - Show the cart with totals
//! - `pantry clear` - Empty the cart
//! - `pantry checkout` - Place the order
//! - `pantry config` - Manage configuration

mod channels;
mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{AddArgs, CheckoutArgs, ConfigArgs, QtyArgs, RemoveArgs};

/// Pantry CLI - Build a cart and place orders
#[derive(Parser)]
#[command(name = "pantry")]
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
    /// Add a product to the cart
    Add(AddArgs),

    /// Remove a line from the cart
    Remove(RemoveArgs),

    /// Change the quantity of a cart line
    Qty(QtyArgs),

    /// Show the cart
    Show,

    /// Remove every line from the cart
    Clear,

    /// Place the order for the current cart
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "pantry_cli=debug,pantry_commerce=debug,pantry_cache=debug"
    } else {
        "pantry_cli=info,pantry_commerce=info,pantry_cache=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Qty(args) => commands::cart::qty(args, &ctx).await,
        Commands::Show => commands::cart::show(&ctx).await,
        Commands::Clear => commands::cart::clear(&ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
