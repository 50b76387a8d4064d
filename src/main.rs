//! Offers CLI binary entry point.

use clap::Parser;
use offers_sdk::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::RegisterProduct(args) => offers_sdk::cli::handle_register_product(args).await,
        Commands::GetOffers(args) => offers_sdk::cli::handle_get_offers(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
