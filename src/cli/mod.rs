//! CLI entry point for the Offers SDK.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::auth::FileCachedAuthClient;
use crate::client::{with_client, ClientOptions};
use crate::models::Product;

/// Offers service CLI
#[derive(Parser, Debug)]
#[command(name = "offers", version, about = "Offers SDK CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new product
    RegisterProduct(RegisterProductArgs),
    /// List offers for a registered product
    GetOffers(GetOffersArgs),
}

/// Arguments for `offers register-product`.
#[derive(Parser, Debug)]
pub struct RegisterProductArgs {
    /// Product id (UUID)
    pub id: Uuid,
    pub name: String,
    pub description: String,

    /// Path to a YAML config file with fallback values
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments for `offers get-offers`.
#[derive(Parser, Debug)]
pub struct GetOffersArgs {
    /// Product id (UUID)
    pub product_id: Uuid,

    /// Path to a YAML config file with fallback values
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn options(config: Option<PathBuf>) -> ClientOptions {
    ClientOptions {
        config_path: config,
        token_cache_path: Some(FileCachedAuthClient::default_path()),
        ..ClientOptions::default()
    }
}

pub async fn handle_register_product(
    args: RegisterProductArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = Product::new(Some(args.id), args.name, args.description);

    let registered = with_client(options(args.config), |client| async move {
        client.products.register_product(&product).await
    })
    .await?;

    println!("Product registered:");
    println!("{}", serde_json::to_string_pretty(&registered)?);
    Ok(())
}

pub async fn handle_get_offers(args: GetOffersArgs) -> Result<(), Box<dyn std::error::Error>> {
    let offers = with_client(options(args.config), |client| async move {
        client.offers.get_offers(args.product_id).await
    })
    .await?;

    if offers.is_empty() {
        println!("No offers found.");
        return Ok(());
    }

    println!("{:<38} {:>10} {:>8}", "ID", "PRICE", "STOCK");
    for offer in &offers {
        println!(
            "{:<38} {:>10} {:>8}",
            offer.id, offer.price, offer.items_in_stock
        );
    }
    Ok(())
}
