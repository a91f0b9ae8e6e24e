use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lavka_api::{KeyStore, StoreClient};
use lavka_cart::CartStore;
use lavka_core::load_app_config;

mod cart;
mod catalog;
mod key;
mod orders;

#[derive(Debug, Parser)]
#[command(name = "lavka")]
#[command(about = "Storefront client: browse the catalog, keep a cart, manage orders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the goods catalog page by page
    Catalog(catalog::CatalogArgs),
    /// Show one good in detail
    Good { id: i64 },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        command: cart::CartCommand,
    },
    /// Inspect and manage orders
    Order {
        #[command(subcommand)]
        command: orders::OrderCommand,
    },
    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        command: key::KeyCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let keys = KeyStore::new(&config.state_dir);
    let cart = CartStore::open(&config.state_dir);
    let client =
        StoreClient::with_base_url(keys.clone(), config.request_timeout_secs, &config.base_url)?;

    match cli.command {
        Commands::Catalog(args) => catalog::run(&client, &config, args).await,
        Commands::Good { id } => catalog::show_good(&client, id).await,
        Commands::Cart { command } => cart::run(&client, &cart, command).await,
        Commands::Order { command } => orders::run(&client, &cart, command).await,
        Commands::Key { command } => key::run(&keys, &command),
    }
}
