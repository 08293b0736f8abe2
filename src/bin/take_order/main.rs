//! Take-order dry run.
//!
//! This binary settles one 0x v3 order fill against an in-memory fund vault
//! seeded from the command line, logs the token transfers the fill requires
//! and prints the resulting fill record and holdings.

mod config;
mod error;

use alloy::primitives::U256;
use clap::Parser;
use fund_order_taker::{
    fill::FillRecord,
    num::Converter,
    state::{LoggingEffector, Vault, Vaults},
    types,
};
use std::process::exit;
use tracing::error;

use config::{CliConfig, EnvConfig};

const VAULT_ID: types::VaultId = 0;

#[tokio::main]
async fn main() {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    // Parse environment configuration
    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    // Parse CLI arguments
    let cli_config = CliConfig::parse();

    // Set up logging
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run(&env_config, &cli_config).await {
        error!(%e, "Take order failed");
        exit(1);
    }
}

async fn run(env_config: &EnvConfig, cli_config: &CliConfig) -> error::Result<()> {
    let venue = env_config.venue()?;
    let vault_address = env_config.vault_address()?;

    let protocol_fee = match env_config.gas_price_wei {
        Some(gas_price) => venue.protocol_fee(U256::from(gas_price))?,
        None => U256::ZERO,
    };
    let request = cli_config.to_fill_request(protocol_fee)?;
    let holdings = cli_config.holdings()?;

    let vaults = Vaults::new();
    vaults.insert(Vault::new(VAULT_ID, vault_address, venue).with_holdings(holdings));

    let record = vaults
        .take_order(VAULT_ID, &request, LoggingEffector)
        .await?;

    let converter = cli_config.converter();
    print_record(&record, &converter);

    if let Some(vault) = vaults.get(VAULT_ID) {
        println!("Holdings:");
        for (asset, amount) in vault.lock().await.holdings().sorted() {
            println!("  {asset}: {}", converter.from_unsigned::<4>(amount));
        }
    }

    Ok(())
}

fn print_record(record: &FillRecord, converter: &Converter) {
    println!("Filled on {}", record.exchange);
    println!(
        "  bought {} of {}",
        converter.from_unsigned::<4>(record.bought_amount),
        record.bought_asset
    );
    println!(
        "  sold {} of {}",
        converter.from_unsigned::<4>(record.sold_amount),
        record.sold_asset
    );
    for fee in &record.fees {
        println!(
            "  fee {} of {}",
            converter.from_unsigned::<4>(fee.amount),
            fee.asset
        );
    }
}
