//! Fill record data structures.

use alloy::primitives::{Address, U256};

use crate::{
    abi::events::OrderFilled,
    error::{SettlementError, SettlementResult},
    types,
};

/// Single fee charged to the vault by a fill.
#[derive(Clone, Copy, derive_more::Debug, PartialEq, Eq)]
#[debug("{amount} of {asset}")]
pub struct FeeCharge {
    pub asset: types::Asset,
    pub amount: U256,
}

impl FeeCharge {
    /// Returns `None` for a missing fee asset or a zero amount.
    pub fn charged(asset: Option<types::Asset>, amount: U256) -> Option<Self> {
        asset
            .filter(|_| !amount.is_zero())
            .map(|asset| Self { asset, amount })
    }
}

/// Fee legs of a fill, one slot per fee source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeLegs {
    /// Exchange protocol fee, always in the taker asset.
    pub protocol: Option<FeeCharge>,

    /// Order taker fee.
    pub taker: Option<FeeCharge>,

    /// Order maker fee.
    pub maker: Option<FeeCharge>,
}

impl FeeLegs {
    pub fn new(
        taker_asset: types::Asset,
        protocol_fee: U256,
        taker_fee_asset: Option<types::Asset>,
        taker_fee_amount: U256,
        maker_fee_asset: Option<types::Asset>,
        maker_fee_amount: U256,
    ) -> Self {
        Self {
            protocol: FeeCharge::charged(Some(taker_asset), protocol_fee),
            taker: FeeCharge::charged(taker_fee_asset, taker_fee_amount),
            maker: FeeCharge::charged(maker_fee_asset, maker_fee_amount),
        }
    }

    /// Charged fees in record order: protocol, taker, maker.
    pub fn iter(&self) -> impl Iterator<Item = &FeeCharge> {
        [&self.protocol, &self.taker, &self.maker].into_iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Auditable record of a committed fill, from the vault's point of view.
#[derive(Clone, derive_more::Debug, PartialEq, Eq)]
pub struct FillRecord {
    /// Exchange the order was filled on.
    pub exchange: Address,

    /// Maker asset received.
    pub bought_asset: types::Asset,

    #[debug("{bought_amount}")]
    pub bought_amount: U256,

    /// Taker asset given up.
    pub sold_asset: types::Asset,

    /// Taker asset given up, excluding fees.
    #[debug("{sold_amount}")]
    pub sold_amount: U256,

    /// Every fee charged, protocol fee first, then taker fee, then maker fee.
    ///
    /// Legs in the same asset are listed separately.
    pub fees: Vec<FeeCharge>,
}

impl FillRecord {
    /// Total of the fees charged in `asset`.
    pub fn fees_in(&self, asset: types::Asset) -> SettlementResult<U256> {
        self.fees
            .iter()
            .filter(|fee| fee.asset == asset)
            .try_fold(U256::ZERO, |total, fee| {
                total
                    .checked_add(fee.amount)
                    .ok_or(SettlementError::ArithmeticOverflow)
            })
    }
}

/// Assembles the record of a fill.
///
/// Fees with no asset or a zero amount are left out.
#[allow(clippy::too_many_arguments)]
pub fn build_record(
    exchange: Address,
    maker_asset: types::Asset,
    maker_fill_amount: U256,
    taker_asset: types::Asset,
    taker_fill_amount: U256,
    protocol_fee_amount: U256,
    taker_fee_fill_amount: U256,
    taker_fee_asset: Option<types::Asset>,
    maker_fee_fill_amount: U256,
    maker_fee_asset: Option<types::Asset>,
) -> FillRecord {
    let fees = FeeLegs::new(
        taker_asset,
        protocol_fee_amount,
        taker_fee_asset,
        taker_fee_fill_amount,
        maker_fee_asset,
        maker_fee_fill_amount,
    );
    FillRecord {
        exchange,
        bought_asset: maker_asset,
        bought_amount: maker_fill_amount,
        sold_asset: taker_asset,
        sold_amount: taker_fill_amount,
        fees: fees.iter().copied().collect(),
    }
}

impl From<&FillRecord> for OrderFilled {
    fn from(record: &FillRecord) -> Self {
        let (fee_assets, fee_amounts) = record
            .fees
            .iter()
            .map(|fee| (fee.asset, fee.amount))
            .unzip();
        OrderFilled {
            exchangeAddress: record.exchange,
            buyAsset: record.bought_asset,
            buyAmount: record.bought_amount,
            sellAsset: record.sold_asset,
            sellAmount: record.sold_amount,
            feeAssets: fee_assets,
            feeAmounts: fee_amounts,
        }
    }
}
