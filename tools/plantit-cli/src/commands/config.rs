//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use plantit_commerce::StoreConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.title("Current Configuration");

    match &ctx.config_path {
        Some(path) => ctx.output.field("file", path.display()),
        None => ctx.output.field("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.title("[shipping]");
    let shipping = &config.shipping;
    ctx.output
        .field("free_shipping_threshold", shipping.free_shipping_threshold);
    ctx.output.field("flat_fee", shipping.flat_fee);

    ctx.output.title("[checkout]");
    let checkout = &config.checkout;
    ctx.output.field("settle_delay_ms", checkout.settle_delay_ms);
    ctx.output.field(
        "default_payment_method",
        checkout.default_payment_method.map_or("none", |m| m.as_str()),
    );
    ctx.output
        .field("require_non_empty_cart", checkout.require_non_empty_cart);

    ctx.output.title("[scan]");
    ctx.output
        .field("analysis_delay_ms", config.scan.analysis_delay_ms);

    ctx.output.title("[nursery]");
    ctx.output
        .field("review_delay_ms", config.nursery.review_delay_ms);

    ctx.output.title("[support]");
    ctx.output
        .field("reply_delay_ms", config.support.reply_delay_ms);

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = StoreConfig::default().to_toml()?;
    fs::write(&config_path, content)?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}
