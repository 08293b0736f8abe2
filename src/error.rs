use alloy::primitives::{Bytes, U256};

use crate::{state::TransferError, types};

/// Reason a fill request was rejected.
///
/// Every variant is detected before the vault holdings ledger is touched, so a
/// rejected fill leaves the vault exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SettlementError {
    #[error("malformed asset data: {0}")]
    MalformedEncoding(Bytes),

    #[error("makerAssetData does not match address, declared: {declared}, encoded: {encoded:?}")]
    MakerAssetMismatch {
        declared: types::Asset,
        encoded: Option<types::Asset>,
    },

    #[error("takerAssetData does not match address, declared: {declared}, encoded: {encoded:?}")]
    TakerAssetMismatch {
        declared: types::Asset,
        encoded: Option<types::Asset>,
    },

    #[error("taker fill amount greater than max order quantity, requested: {requested}, max: {capacity}")]
    FillExceedsOrderCapacity { requested: U256, capacity: U256 },

    #[error("taker fill amount must be greater than zero")]
    ZeroFillQuantity,

    #[error("takerFeeAssetData does not match address, declared: {declared:?}, encoded: {encoded:?}")]
    TakerFeeAssetMismatch {
        declared: Option<types::Asset>,
        encoded: Option<types::Asset>,
    },

    #[error("makerFeeAssetData does not match address, declared: {declared:?}, encoded: {encoded:?}")]
    MakerFeeAssetMismatch {
        declared: Option<types::Asset>,
        encoded: Option<types::Asset>,
    },

    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    #[error("insufficient holdings of {asset}, required: {required}, available: {available}")]
    InsufficientHoldings {
        asset: types::Asset,
        required: U256,
        available: U256,
    },

    #[error("transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("no price for asset {0}")]
    MissingPrice(types::Asset),

    #[error("vault not found: {0}")]
    UnknownVault(types::VaultId),
}

pub type SettlementResult<T> = Result<T, SettlementError>;
