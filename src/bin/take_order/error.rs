//! Error types for the take-order dry run.

use fund_order_taker::error::SettlementError;

use crate::config::ConfigError;

/// Main error type for the take-order dry run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Environment configuration error: {0}")]
    EnvConfig(#[from] envy::Error),

    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] alloy::primitives::hex::FromHexError),

    #[error("Settlement error: {0}")]
    Settlement(#[from] SettlementError),
}

pub type Result<T> = std::result::Result<T, Error>;
