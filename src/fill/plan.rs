use alloy::primitives::Address;

use super::{FeeLegs, FillAmounts, FillRecord, build_record, compute_fill, validate};
use crate::{error::SettlementResult, types};

/// Validated and priced fill of a single request, ready to be settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillPlan {
    maker_asset: types::Asset,
    taker_asset: types::Asset,
    taker_fee_asset: Option<types::Asset>,
    maker_fee_asset: Option<types::Asset>,
    amounts: FillAmounts,
    fees: FeeLegs,
}

impl FillPlan {
    /// Validates the request and computes the fill amounts.
    ///
    /// Pure, the plan is only applied by [`crate::state::Vault::take_order`].
    pub fn new(request: &types::FillRequest) -> SettlementResult<Self> {
        validate(request)?;
        let amounts = compute_fill(
            &request.order,
            request.fill_taker_quantity,
            request.protocol_fee,
        )?;
        let fees = FeeLegs::new(
            request.taker_asset,
            amounts.protocol_fee,
            request.taker_fee_asset,
            amounts.taker_fee_fill_amount,
            request.maker_fee_asset,
            amounts.maker_fee_fill_amount,
        );
        Ok(Self {
            maker_asset: request.maker_asset,
            taker_asset: request.taker_asset,
            taker_fee_asset: request.taker_fee_asset,
            maker_fee_asset: request.maker_fee_asset,
            amounts,
            fees,
        })
    }

    pub fn maker_asset(&self) -> types::Asset {
        self.maker_asset
    }

    pub fn taker_asset(&self) -> types::Asset {
        self.taker_asset
    }

    pub fn amounts(&self) -> &FillAmounts {
        &self.amounts
    }

    /// Charged fee legs.
    pub fn fees(&self) -> &FeeLegs {
        &self.fees
    }

    /// Record of this fill once it is committed.
    pub fn record(&self, exchange: Address) -> FillRecord {
        build_record(
            exchange,
            self.maker_asset,
            self.amounts.maker_fill_amount,
            self.taker_asset,
            self.amounts.taker_fill_amount,
            self.amounts.protocol_fee,
            self.amounts.taker_fee_fill_amount,
            self.taker_fee_asset,
            self.amounts.maker_fee_fill_amount,
            self.maker_fee_asset,
        )
    }
}
