//! Configuration for the take-order dry run.
//!
//! Configuration comes from two sources:
//! - Environment variables (via .env file or shell): venue and vault
//! - CLI arguments: the order, the fill and the vault holdings

use alloy::primitives::{Address, U256, hex::FromHexError};
use clap::Parser;
use fastnum::{UD256, decimal::Context};
use fund_order_taker::{
    DEFAULT_PROTOCOL_FEE_MULTIPLIER, Venue, fill, num,
    state::HoldingsLedger,
    types::{self, FillRequest, Order},
};

/// Environment configuration.
#[derive(Debug, serde::Deserialize)]
pub struct EnvConfig {
    /// Chain ID, mainnet venue is used when not set
    pub chain_id: Option<u64>,

    /// Exchange contract address
    pub exchange_address: Option<String>,

    /// ERC-20 asset proxy address
    pub erc20_proxy_address: Option<String>,

    /// Protocol fee multiplier (default: 150000)
    pub protocol_fee_multiplier: Option<u64>,

    /// Gas price of the fill transaction, no protocol fee is charged when not set
    pub gas_price_wei: Option<u64>,

    /// Vault address
    pub vault_address: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Venue from the configured chain, mainnet if no chain is configured.
    pub fn venue(&self) -> Result<Venue, FromHexError> {
        let Some(chain_id) = self.chain_id else {
            return Ok(Venue::mainnet());
        };
        let mainnet = Venue::mainnet();
        let exchange = match &self.exchange_address {
            Some(address) => address.parse()?,
            None => mainnet.exchange(),
        };
        let erc20_proxy = match &self.erc20_proxy_address {
            Some(address) => address.parse()?,
            None => mainnet.erc20_proxy(),
        };
        let multiplier = self
            .protocol_fee_multiplier
            .unwrap_or(DEFAULT_PROTOCOL_FEE_MULTIPLIER);
        Ok(Venue::custom(
            chain_id,
            exchange,
            erc20_proxy,
            U256::from(multiplier),
        ))
    }

    /// Parse the vault address.
    pub fn vault_address(&self) -> Result<Address, FromHexError> {
        self.vault_address
            .as_deref()
            .map_or(Ok(Address::ZERO), str::parse)
    }
}

/// CLI arguments describing the order and the fill.
#[derive(Debug, Parser)]
#[command(name = "take-order")]
#[command(about = "Dry-run a 0x v3 order fill against an in-memory fund vault")]
pub struct CliConfig {
    /// Asset the maker offers (the vault receives)
    #[arg(long)]
    pub maker_asset: Address,

    /// Full maker amount of the order, in whole tokens (e.g., 1.5)
    #[arg(long)]
    pub maker_amount: String,

    /// Asset the maker requests (the vault gives up)
    #[arg(long)]
    pub taker_asset: Address,

    /// Full taker amount of the order, in whole tokens
    #[arg(long)]
    pub taker_amount: String,

    /// Taker fee of the order, in whole tokens
    #[arg(long, default_value = "0")]
    pub taker_fee: String,

    /// Asset the taker fee is paid in
    #[arg(long)]
    pub taker_fee_asset: Option<Address>,

    /// Maker fee of the order, in whole tokens
    #[arg(long, default_value = "0")]
    pub maker_fee: String,

    /// Asset the maker fee is paid in
    #[arg(long)]
    pub maker_fee_asset: Option<Address>,

    /// Taker amount to fill, the whole order if not specified
    #[arg(long)]
    pub fill: Option<String>,

    /// Vault holdings before the fill (comma-separated, e.g., "0xc02a...=1,0x6b17...=2.5")
    #[arg(long, value_delimiter = ',')]
    pub holding: Vec<String>,

    /// Decimals of every asset involved
    #[arg(long, default_value = "18")]
    pub decimals: u8,
}

impl CliConfig {
    pub fn converter(&self) -> num::Converter {
        num::Converter::new(self.decimals)
    }

    /// Build the order and the fill request it is taken with.
    pub fn to_fill_request(&self, protocol_fee: U256) -> Result<FillRequest, ConfigError> {
        let amount = |name: &str, value: &str| self.amount(name, value);

        let maker_amount = amount("maker_amount", &self.maker_amount)?;
        let taker_amount = amount("taker_amount", &self.taker_amount)?;
        if taker_amount.is_zero() {
            return Err(ConfigError::ZeroTakerAmount);
        }
        let taker_fee = amount("taker_fee", &self.taker_fee)?;
        let maker_fee = amount("maker_fee", &self.maker_fee)?;
        let fill_taker_quantity = match &self.fill {
            Some(value) => amount("fill", value)?,
            None => taker_amount,
        };

        let order = Order {
            maker_asset_amount: maker_amount,
            taker_asset_amount: taker_amount,
            maker_fee,
            taker_fee,
            maker_asset_data: fill::encode_asset_data(self.maker_asset),
            taker_asset_data: fill::encode_asset_data(self.taker_asset),
            maker_fee_asset_data: fee_asset_data(
                "maker_fee_asset",
                maker_fee,
                self.maker_fee_asset,
            )?,
            taker_fee_asset_data: fee_asset_data(
                "taker_fee_asset",
                taker_fee,
                self.taker_fee_asset,
            )?,
            ..Default::default()
        };

        Ok(FillRequest {
            maker_fee_asset: self.maker_fee_asset,
            taker_fee_asset: self.taker_fee_asset,
            ..FillRequest::new(order, fill_taker_quantity, self.maker_asset, self.taker_asset)
        }
        .with_protocol_fee(protocol_fee))
    }

    /// Vault holdings given by `--holding` arguments.
    pub fn holdings(&self) -> Result<HoldingsLedger, ConfigError> {
        let mut ledger = HoldingsLedger::new();
        for holding in &self.holding {
            let (asset, value) = holding
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidHolding(holding.clone()))?;
            let asset: types::Asset = asset
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHolding(holding.clone()))?;
            let amount = self.amount("holding", value.trim())?;
            ledger
                .credit(asset, amount)
                .map_err(|_| ConfigError::InvalidHolding(holding.clone()))?;
        }
        Ok(ledger)
    }

    /// Base units of a decimal amount, rejecting amounts the token can not
    /// represent exactly.
    fn amount(&self, name: &str, value: &str) -> Result<U256, ConfigError> {
        let invalid = || ConfigError::InvalidAmount(name.to_string());
        let value = UD256::from_str(value, Context::default()).map_err(|_| invalid())?;
        self.converter().to_unsigned(value).ok_or_else(invalid)
    }
}

fn fee_asset_data(
    name: &str,
    fee: U256,
    asset: Option<types::Asset>,
) -> Result<alloy::primitives::Bytes, ConfigError> {
    match (fee.is_zero(), asset) {
        (_, Some(asset)) => Ok(fill::encode_asset_data(asset)),
        (true, None) => Ok(Default::default()),
        (false, None) => Err(ConfigError::MissingFeeAsset(name.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid amount value for {0}")]
    InvalidAmount(String),

    #[error("taker_amount cannot be zero")]
    ZeroTakerAmount,

    #[error("{0} is required for a nonzero fee")]
    MissingFeeAsset(String),

    #[error("Invalid holding {0}, expected ASSET=AMOUNT")]
    InvalidHolding(String),
}
