//! CLI command implementations.

pub mod catalog;
pub mod chat;
pub mod checkout;
pub mod config;
pub mod nursery;
pub mod scan;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show one category (fertilizer, medicine, tool).
    #[arg(long)]
    pub category: Option<String>,

    /// Case-insensitive name search.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order (name, price, rating).
    #[arg(long, default_value = "name")]
    pub sort: String,
}

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Photo of the plant.
    pub file: String,

    /// MIME type, if the extension is misleading.
    #[arg(long)]
    pub mime: Option<String>,

    /// Force a diagnosis by index or condition name instead of a random one.
    #[arg(long)]
    pub pick: Option<String>,

    /// Add every recommended product to a cart and show its bill.
    #[arg(long)]
    pub add_products: bool,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Product ids to put in the cart; repeat an id to buy more than one.
    #[arg(short, long = "add", required = true, num_args = 1..)]
    pub add: Vec<String>,

    /// Full name.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Email address.
    #[arg(long, default_value = "")]
    pub email: String,

    /// Phone number.
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Street address.
    #[arg(long, default_value = "")]
    pub address: String,

    /// City.
    #[arg(long, default_value = "")]
    pub city: String,

    /// State or region.
    #[arg(long, default_value = "")]
    pub state: String,

    /// PIN code.
    #[arg(long, default_value = "")]
    pub pin: String,

    /// Nearby landmark.
    #[arg(long)]
    pub landmark: Option<String>,

    /// Payment method (card, upi, cod).
    #[arg(short, long)]
    pub payment: Option<String>,
}

/// Arguments for the nursery command.
#[derive(Args)]
pub struct NurseryArgs {
    /// Application file (TOML, or JSON when it ends in `.json`).
    pub application: String,
}

/// Arguments for the chat command.
#[derive(Args)]
pub struct ChatArgs {
    /// Who to talk to (tech, nursery).
    #[arg(long, default_value = "tech")]
    pub channel: String,

    /// Messages to send, in order.
    #[arg(required = true, num_args = 1..)]
    pub messages: Vec<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a config file with the defaults.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
