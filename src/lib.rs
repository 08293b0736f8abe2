//! Fund order taker.
//!
//! # Overview
//!
//! Settlement engine for a fund vault taking signed 0x v3 limit orders.
//!
//! Build a [`types::FillRequest`] from the signed order, the requested taker
//! fill quantity and the assets the caller intends to trade, then pass it to
//! [`state::Vault::take_order`]. The vault:
//!
//! 1. re-derives every asset from the order's own asset data and cross-checks
//!    it against the declared one ([`fill::validate`]),
//! 2. scales maker amount and order fees to the fill quantity
//!    ([`fill::compute_fill`]),
//! 3. stages and commits the holdings ledger update as a single all-or-nothing
//!    step ([`state::HoldingsLedger::stage`]),
//! 4. returns a [`fill::FillRecord`] listing bought/sold assets and every fee
//!    charged.
//!
//! Vaults shared between tasks are kept in [`state::Vaults`], which serialises
//! fills per vault while letting distinct vaults settle in parallel.
//!
//! # Limitations/follow-ups
//!
//! * Only the ERC-20 asset proxy encoding is understood; multi-asset and
//!   ERC-721/1155 asset data are rejected as malformed.
//!
//! * Order signatures and expiration are not checked, orders are assumed to
//!   come from an authenticated upstream.
//!
//! # Testing
//!
//! [`testing`] module provides well-known assets, an order builder and a
//! recording transfer effector.

pub mod abi;
pub mod error;
pub mod fill;
pub mod num;
pub mod state;
pub mod testing;
pub mod types;

use alloy::primitives::{Address, U256, address};

/// Default 0x v3 protocol fee multiplier, the protocol fee of a fill is
/// `multiplier * gas price` wei of the taker asset.
pub const DEFAULT_PROTOCOL_FEE_MULTIPLIER: u64 = 150_000;

#[derive(Clone, Debug)]
/// Exchange venue the vault is trading on.
pub struct Venue {
    chain_id: u64,
    exchange: Address,
    erc20_proxy: Address,
    protocol_fee_multiplier: U256,
}

impl Venue {
    pub fn mainnet() -> Self {
        Self {
            chain_id: 1,
            exchange: address!("0x61935cbdd02287b511119ddb11aeb42f1593b7ef"),
            erc20_proxy: address!("0x95e6f48254609a6ee006f7d493c8e5fb97094cef"),
            protocol_fee_multiplier: U256::from(DEFAULT_PROTOCOL_FEE_MULTIPLIER),
        }
    }

    pub fn custom(
        chain_id: u64,
        exchange: Address,
        erc20_proxy: Address,
        protocol_fee_multiplier: U256,
    ) -> Self {
        Self {
            chain_id,
            exchange,
            erc20_proxy,
            protocol_fee_multiplier,
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Address of the exchange contract, reported in every fill record and
    /// receiving the protocol fee.
    pub fn exchange(&self) -> Address {
        self.exchange
    }

    /// Address of the ERC-20 asset proxy the exchange pulls tokens through.
    pub fn erc20_proxy(&self) -> Address {
        self.erc20_proxy
    }

    pub fn protocol_fee_multiplier(&self) -> U256 {
        self.protocol_fee_multiplier
    }

    /// Protocol fee charged by this venue for a fill at the given gas price.
    ///
    /// Zero when the venue has fee collection disabled (zero multiplier).
    pub fn protocol_fee(&self, gas_price: U256) -> Result<U256, error::SettlementError> {
        fill::protocol_fee(self.protocol_fee_multiplier, gas_price)
    }
}
