mod order;
mod request;

use alloy::primitives::{Address, U256};

pub use order::Order;
pub use request::FillRequest;

/// Fungible token, identified by its contract address.
pub type Asset = Address;

/// Token quantity in base units.
pub type Amount = U256;

/// ID of a vault within a [`crate::state::Vaults`] registry.
pub type VaultId = u32;
