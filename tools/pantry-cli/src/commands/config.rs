//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { shop_name, force } => init_config(shop_name, force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let config = &ctx.config;

    ctx.output.info("[shop]");
    ctx.output.kv("name", &config.shop.name);

    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv(
        "free_delivery_threshold",
        &config.pricing.free_delivery_threshold.to_string(),
    );
    ctx.output.kv("delivery_fee", &config.pricing.delivery_fee.to_string());
    ctx.output.kv("minimum_order", &config.pricing.minimum_order.to_string());

    ctx.output.info("");
    ctx.output.info("[order]");
    ctx.output.kv("id_prefix", &config.order.id_prefix);
    ctx.output.kv("whatsapp_number", &config.order.whatsapp_number);
    ctx.output.kv(
        "webhook_url",
        config.order.webhook_url.as_deref().unwrap_or("(not set)"),
    );
    ctx.output.kv(
        "webhook_timeout_secs",
        &config.order.webhook_timeout_secs.to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.storage_dir().display().to_string());

    Ok(())
}

async fn init_config(shop_name: Option<String>, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("pantry.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let name = shop_name.unwrap_or_else(|| ctx.config.shop.name.clone());
    fs::write(&config_path, generate_default_config(&name))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
