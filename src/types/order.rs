use alloy::primitives::{Address, Bytes, U256};

use super::Asset;
use crate::{error::SettlementResult, fill};

/// Signed 0x v3 limit order.
///
/// Amounts are the full order quantities. Asset identities are carried only
/// in their encoded form, see [`fill::decode_asset_data`].
///
/// `taker_address`, `sender_address`, `expiration_time_seconds`, `salt`
/// and `signature` are passed through untouched, the order is assumed to be
/// authenticated upstream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Order {
    /// Account that signed the order and delivers the maker asset.
    pub maker_address: Address,

    pub taker_address: Address,

    /// Account receiving the maker and taker fees.
    pub fee_recipient_address: Address,

    pub sender_address: Address,

    /// Full amount of the maker asset offered.
    pub maker_asset_amount: U256,

    /// Full amount of the taker asset requested, never zero for a fillable order.
    pub taker_asset_amount: U256,

    /// Full maker fee, zero if the order charges none.
    pub maker_fee: U256,

    /// Full taker fee, zero if the order charges none.
    pub taker_fee: U256,

    pub expiration_time_seconds: U256,

    pub salt: U256,

    pub maker_asset_data: Bytes,

    pub taker_asset_data: Bytes,

    /// Empty if the order charges no maker fee.
    pub maker_fee_asset_data: Bytes,

    /// Empty if the order charges no taker fee.
    pub taker_fee_asset_data: Bytes,

    pub signature: Bytes,
}

impl Order {
    /// Maker asset as encoded in the order.
    pub fn maker_asset(&self) -> SettlementResult<Option<Asset>> {
        fill::decode_asset_data(&self.maker_asset_data)
    }

    /// Taker asset as encoded in the order.
    pub fn taker_asset(&self) -> SettlementResult<Option<Asset>> {
        fill::decode_asset_data(&self.taker_asset_data)
    }

    pub fn maker_fee_asset(&self) -> SettlementResult<Option<Asset>> {
        fill::decode_asset_data(&self.maker_fee_asset_data)
    }

    pub fn taker_fee_asset(&self) -> SettlementResult<Option<Asset>> {
        fill::decode_asset_data(&self.taker_fee_asset_data)
    }

    /// Indicator of the order requesting `fill_taker_quantity` or more of the
    /// taker asset.
    pub fn covers(&self, fill_taker_quantity: U256) -> bool {
        fill_taker_quantity <= self.taker_asset_amount
    }
}
