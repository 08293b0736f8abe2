use alloy::primitives::U256;

use super::{Asset, Order};

/// Request to take (part of) an order on behalf of a vault.
///
/// The declared assets are what the transfer effector is going to move, they
/// are cross-checked against the order's own asset data before anything is
/// settled.
#[derive(Clone, derive_more::Debug, PartialEq, Eq)]
pub struct FillRequest {
    pub order: Order,

    /// Amount of the taker asset to fill, `0 < q <= order.taker_asset_amount`.
    #[debug("{fill_taker_quantity}")]
    pub fill_taker_quantity: U256,

    /// Asset the vault expects to receive.
    pub maker_asset: Asset,

    /// Asset the vault expects to give up.
    pub taker_asset: Asset,

    pub maker_fee_asset: Option<Asset>,

    pub taker_fee_asset: Option<Asset>,

    /// Fixed per-fill exchange fee in the taker asset, zero when the venue
    /// does not collect one.
    #[debug("{protocol_fee}")]
    pub protocol_fee: U256,
}

impl FillRequest {
    /// Create a new request without fee assets and protocol fee.
    pub fn new(
        order: Order,
        fill_taker_quantity: U256,
        maker_asset: Asset,
        taker_asset: Asset,
    ) -> Self {
        Self {
            order,
            fill_taker_quantity,
            maker_asset,
            taker_asset,
            maker_fee_asset: None,
            taker_fee_asset: None,
            protocol_fee: U256::ZERO,
        }
    }

    pub fn with_maker_fee_asset(mut self, asset: Asset) -> Self {
        self.maker_fee_asset = Some(asset);
        self
    }

    pub fn with_taker_fee_asset(mut self, asset: Asset) -> Self {
        self.taker_fee_asset = Some(asset);
        self
    }

    pub fn with_protocol_fee(mut self, protocol_fee: U256) -> Self {
        self.protocol_fee = protocol_fee;
        self
    }

    /// Indicator of the request filling the whole order.
    pub fn is_full_fill(&self) -> bool {
        self.fill_taker_quantity == self.order.taker_asset_amount
    }
}
