mod export;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sgbridge-cli")]
#[command(about = "Shopgate bridge export tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Map a product's advanced prices to Shopgate tier prices
    TierPrices {
        /// Price export document (JSON, or YAML by extension)
        file: PathBuf,
    },
    /// Print the highest price an exportable advanced price can reach
    HighestPrice {
        /// Price export document (JSON, or YAML by extension)
        file: PathBuf,
    },
    /// Map a category subtree and the product sort order of each category
    Categories {
        /// Catalog export document (JSON, or YAML by extension)
        file: PathBuf,
    },
    /// Print the resolved configuration with secrets redacted
    Config,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = sgbridge_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::TierPrices { file } => export::run_tier_prices(&config, &file),
        Commands::HighestPrice { file } => export::run_highest_price(&config, &file),
        Commands::Categories { file } => export::run_categories(&config, &file),
        Commands::Config => {
            println!("{config:#?}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
