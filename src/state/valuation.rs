use std::{collections::HashMap, hash::BuildHasher};

use alloy::primitives::U256;

use super::*;

/// Price of one whole unit of an asset.
#[derive(Clone, Copy, derive_more::Debug, PartialEq, Eq)]
pub struct AssetPrice {
    /// Quote asset base units per whole unit of the asset.
    #[debug("{price}")]
    pub price: U256,

    /// Decimals of the priced asset.
    pub decimals: u8,
}

/// Read-only price lookup used for valuation reporting.
pub trait PriceSource {
    fn price(&self, asset: types::Asset) -> Option<AssetPrice>;
}

impl<S: BuildHasher> PriceSource for HashMap<types::Asset, AssetPrice, S> {
    fn price(&self, asset: types::Asset) -> Option<AssetPrice> {
        self.get(&asset).copied()
    }
}

/// Sum of all holdings valued in the quote asset, rounded down per asset.
///
/// The quote asset counts at par. Fails with
/// [`SettlementError::MissingPrice`] for a nonzero holding without a price.
pub fn holdings_value<P: PriceSource + ?Sized>(
    ledger: &HoldingsLedger,
    prices: &P,
    quote: types::Asset,
) -> SettlementResult<U256> {
    ledger
        .sorted()
        .into_iter()
        .filter(|(_, balance)| !balance.is_zero())
        .try_fold(U256::ZERO, |total, (asset, balance)| {
            let value = if asset == quote {
                balance
            } else {
                let price = prices
                    .price(asset)
                    .ok_or(SettlementError::MissingPrice(asset))?;
                let unit = num::Converter::new(price.decimals)
                    .unit()
                    .ok_or(SettlementError::ArithmeticOverflow)?;
                balance
                    .checked_mul(price.price)
                    .ok_or(SettlementError::ArithmeticOverflow)?
                    / unit
            };
            total
                .checked_add(value)
                .ok_or(SettlementError::ArithmeticOverflow)
        })
}
