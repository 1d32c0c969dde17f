//! Plant.It CLI - the storefront from the terminal.
//!
//! Commands:
//! - `plantit catalog` - Browse and filter products
//! - `plantit scan` - Diagnose a plant photo
//! - `plantit checkout` - Place an order
//! - `plantit nursery` - Submit a nursery partner application
//! - `plantit chat` - Message the support team
//! - `plantit config` - Manage configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CatalogArgs, ChatArgs, CheckoutArgs, ConfigArgs, NurseryArgs, ScanArgs};

/// Plant.It - plant care products, diagnosis and checkout
#[derive(Parser)]
#[command(name = "plantit")]
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
    /// List catalog products
    Catalog(CatalogArgs),

    /// Analyse a plant photo
    Scan(ScanArgs),

    /// Run a checkout and place an order
    Checkout(CheckoutArgs),

    /// Register as a nursery partner
    Nursery(NurseryArgs),

    /// Chat with the tech team or partner nurseries
    Chat(ChatArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose turns on debug for the library.
    let default_level = if cli.verbose {
        "plantit_commerce=debug,plantit_cli=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Scan(args) => commands::scan::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Nursery(args) => commands::nursery::run(args, &ctx).await,
        Commands::Chat(args) => commands::chat::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
