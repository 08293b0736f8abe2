//! Vault holdings state.
//!
//! [`HoldingsLedger`] tracks what a vault owns. It is mutated only by
//! deposits and by fills, through a staged update that is checked in full
//! before anything is written.
//!
//! [`Vault`] owns one ledger and settles fills against it, requesting token
//! movements from a [`TransferEffector`]. [`Vaults`] shares vaults between
//! tasks with one lock per vault.

mod ledger;
mod registry;
mod transfer;
mod valuation;
mod vault;

use crate::{
    Venue,
    error::{SettlementError, SettlementResult},
    fill, num, types,
};

// Public re-exports
pub use ledger::*;
pub use registry::*;
pub use transfer::{LoggingEffector, Transfer, TransferEffector, TransferError};
pub use valuation::*;
pub use vault::*;
