//! Take-order fill computation.
//!
//! Everything in this module is pure: no ledger access and no I/O. Given a
//! [`crate::types::FillRequest`] it decides whether the fill is consistent
//! and what it is going to cost.
//!
//! # Architecture
//!
//! - [`decode_asset_data`] - ERC-20 asset data decoder
//! - [`validate`] - cross-checks declared assets against the order and
//!   bounds the fill quantity
//! - [`compute_fill`] - proportional maker amount and fee amounts
//! - [`build_record`] - ordered, zero-free fee list of a committed fill
//! - [`FillPlan`] - all of the above for a single request, consumed by
//!   [`crate::state::Vault::take_order`]
//!
//! # Example
//!
//! ```ignore
//! use fund_order_taker::{fill, types::FillRequest};
//!
//! let request = FillRequest::new(order, quantity, mln, weth).with_protocol_fee(fee);
//! let plan = fill::FillPlan::new(&request)?;
//!
//! for fee in plan.fees().iter() {
//!     println!("fee {} of {}", fee.amount, fee.asset);
//! }
//! ```

mod amounts;
mod asset_data;
mod plan;
mod record;
mod validator;

pub use amounts::{FillAmounts, compute_fill, protocol_fee};
pub use asset_data::{decode_asset_data, encode_asset_data};
pub use plan::FillPlan;
pub use record::{FeeCharge, FeeLegs, FillRecord, build_record};
pub use validator::validate;
