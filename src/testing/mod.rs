//! Test fixtures.
//!
//! Well-known mainnet assets and counterparties, [`OrderBuilder`] to create
//! orders and matching fill requests, and [`RecordingEffector`] capturing
//! the transfers a fill requests.

use alloy::primitives::{Address, Bytes, U256, address};
use fastnum::{UD128, decimal::Context};

use crate::{
    Venue, fill, num,
    state::{HoldingsLedger, Transfer, TransferEffector, TransferError, Vault},
    types::{self, FillRequest, Order},
};

pub const WETH: types::Asset = address!("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
pub const MLN: types::Asset = address!("0xec67005c4e498ec7f55e092bd1d35cbc47c91892");
pub const DAI: types::Asset = address!("0x6b175474e89094c44da98b954eedeac495271d0f");

pub const MAKER: Address = address!("0x00000000000000000000000000000000000000aa");
pub const FEE_RECIPIENT: Address = address!("0x00000000000000000000000000000000000000fe");
/// Exchange of [`Venue::mainnet`].
pub const EXCHANGE: Address = address!("0x61935cbdd02287b511119ddb11aeb42f1593b7ef");
pub const VAULT: Address = address!("0x000000000000000000000000000000000000000f");

pub const TEST_VAULT_ID: types::VaultId = 1;

/// Amount of an 18 decimals token, `ether("0.05")` is `5 * 10^16`.
pub fn ether(value: &str) -> U256 {
    let value = UD128::from_str(value, Context::default()).unwrap();
    num::Converter::new(18).to_unsigned(value).unwrap()
}

/// Vault [`TEST_VAULT_ID`] at [`VAULT`] on mainnet venue with given holdings.
pub fn test_vault(holdings: &[(types::Asset, U256)]) -> Vault {
    Vault::new(TEST_VAULT_ID, VAULT, Venue::mainnet())
        .with_holdings(holdings.iter().copied().collect::<HoldingsLedger>())
}

/// Builds orders made by [`MAKER`] with fees going to [`FEE_RECIPIENT`].
#[derive(Clone, Debug)]
pub struct OrderBuilder {
    maker_asset: types::Asset,
    taker_asset: types::Asset,
    maker_fee_asset: Option<types::Asset>,
    taker_fee_asset: Option<types::Asset>,
    order: Order,
}

impl OrderBuilder {
    pub fn new(
        maker_asset: types::Asset,
        maker_amount: U256,
        taker_asset: types::Asset,
        taker_amount: U256,
    ) -> Self {
        Self {
            maker_asset,
            taker_asset,
            maker_fee_asset: None,
            taker_fee_asset: None,
            order: Order {
                maker_address: MAKER,
                fee_recipient_address: FEE_RECIPIENT,
                maker_asset_amount: maker_amount,
                taker_asset_amount: taker_amount,
                expiration_time_seconds: U256::from(u32::MAX),
                salt: U256::from(42),
                maker_asset_data: fill::encode_asset_data(maker_asset),
                taker_asset_data: fill::encode_asset_data(taker_asset),
                signature: Bytes::from_static(&[0x1b; 66]),
                ..Default::default()
            },
        }
    }

    pub fn taker_fee(mut self, asset: types::Asset, amount: U256) -> Self {
        self.taker_fee_asset = Some(asset);
        self.order.taker_fee = amount;
        self.order.taker_fee_asset_data = fill::encode_asset_data(asset);
        self
    }

    pub fn maker_fee(mut self, asset: types::Asset, amount: U256) -> Self {
        self.maker_fee_asset = Some(asset);
        self.order.maker_fee = amount;
        self.order.maker_fee_asset_data = fill::encode_asset_data(asset);
        self
    }

    pub fn build(&self) -> Order {
        self.order.clone()
    }

    /// Request filling `fill_taker_quantity` with the declared assets
    /// matching the order.
    pub fn fill(&self, fill_taker_quantity: U256) -> FillRequest {
        FillRequest {
            maker_fee_asset: self.maker_fee_asset,
            taker_fee_asset: self.taker_fee_asset,
            ..FillRequest::new(
                self.build(),
                fill_taker_quantity,
                self.maker_asset,
                self.taker_asset,
            )
        }
    }

    pub fn full_fill(&self) -> FillRequest {
        self.fill(self.order.taker_asset_amount)
    }
}

/// Effector recording every transfer, optionally failing for one asset.
#[derive(Clone, Debug, Default)]
pub struct RecordingEffector {
    pub transfers: Vec<Transfer>,
    fail_on: Option<types::Asset>,
}

impl RecordingEffector {
    pub fn failing_on(asset: types::Asset) -> Self {
        Self {
            transfers: Vec::new(),
            fail_on: Some(asset),
        }
    }
}

impl TransferEffector for RecordingEffector {
    fn transfer(
        &mut self,
        asset: types::Asset,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TransferError> {
        let transfer = Transfer {
            asset,
            from,
            to,
            amount,
        };
        if self.fail_on == Some(asset) {
            return Err(TransferError {
                transfer,
                reason: "transfer rejected".to_string(),
            });
        }
        self.transfers.push(transfer);
        Ok(())
    }
}
