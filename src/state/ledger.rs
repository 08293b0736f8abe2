use std::collections::HashMap;

use alloy::primitives::U256;
use itertools::Itertools;

use super::*;

/// Per-asset holdings of a single vault.
///
/// Balances only change through [`Self::credit`] and committed
/// [`StagedUpdate`]s, and never go below zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoldingsLedger {
    balances: HashMap<types::Asset, U256>,
}

/// Ledger update whose every debit and credit has been checked against the
/// current balances.
///
/// Holds the exclusive borrow of the ledger, so balances can not change
/// between staging and [`Self::commit`]. Dropping it discards the update.
#[must_use = "staged ledger update is discarded unless committed"]
#[derive(Debug)]
pub struct StagedUpdate<'l> {
    ledger: &'l mut HoldingsLedger,
    balances: Vec<(types::Asset, U256)>,
}

impl HoldingsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance of the asset, zero for assets never held.
    pub fn balance(&self, asset: types::Asset) -> U256 {
        self.balances.get(&asset).copied().unwrap_or_default()
    }

    /// Tracked balances, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (types::Asset, U256)> {
        self.balances.iter().map(|(asset, balance)| (*asset, *balance))
    }

    /// Tracked balances ordered by asset address.
    pub fn sorted(&self) -> Vec<(types::Asset, U256)> {
        self.iter().sorted_by_key(|(asset, _)| *asset).collect()
    }

    /// Adds to the balance of the asset.
    pub fn credit(&mut self, asset: types::Asset, amount: U256) -> SettlementResult<()> {
        let balance = self
            .balance(asset)
            .checked_add(amount)
            .ok_or(SettlementError::ArithmeticOverflow)?;
        self.balances.insert(asset, balance);
        Ok(())
    }

    /// Checks and stages the holdings changes of a fill.
    ///
    /// The taker amount and every fee are debited, the maker amount is
    /// credited. Changes are netted per asset, so the maker asset received
    /// also pays fees charged in that asset. Nothing is written unless every
    /// asset ends up with a non-negative balance.
    ///
    /// Fails with [`SettlementError::InsufficientHoldings`] naming the first
    /// asset whose balance plus credit can not cover its debits, checked in
    /// the order taker asset, fee assets in fee order, maker asset.
    pub fn stage(
        &mut self,
        taker_asset: types::Asset,
        taker_amount: U256,
        maker_asset: types::Asset,
        maker_amount: U256,
        fees: impl IntoIterator<Item = fill::FeeCharge>,
    ) -> SettlementResult<StagedUpdate<'_>> {
        // (asset, credit, debit)
        let mut deltas: Vec<(types::Asset, U256, U256)> = Vec::with_capacity(4);
        let legs = std::iter::once((taker_asset, U256::ZERO, taker_amount))
            .chain(
                fees.into_iter()
                    .map(|fee| (fee.asset, U256::ZERO, fee.amount)),
            )
            .chain(std::iter::once((maker_asset, maker_amount, U256::ZERO)));
        for (asset, credit, debit) in legs {
            match deltas.iter_mut().find(|(a, _, _)| *a == asset) {
                Some((_, total_credit, total_debit)) => {
                    *total_credit = total_credit
                        .checked_add(credit)
                        .ok_or(SettlementError::ArithmeticOverflow)?;
                    *total_debit = total_debit
                        .checked_add(debit)
                        .ok_or(SettlementError::ArithmeticOverflow)?;
                }
                None => deltas.push((asset, credit, debit)),
            }
        }

        let balances = deltas
            .into_iter()
            .map(|(asset, credit, debit)| {
                let balance = self.balance(asset);
                let remaining = match balance.checked_sub(debit) {
                    Some(rest) => rest
                        .checked_add(credit)
                        .ok_or(SettlementError::ArithmeticOverflow)?,
                    // On failure `balance + credit < debit`, the sum can not overflow.
                    None => credit.checked_sub(debit - balance).ok_or_else(|| {
                        SettlementError::InsufficientHoldings {
                            asset,
                            required: debit,
                            available: balance + credit,
                        }
                    })?,
                };
                Ok((asset, remaining))
            })
            .collect::<SettlementResult<Vec<_>>>()?;

        Ok(StagedUpdate {
            ledger: self,
            balances,
        })
    }

    /// Stages and immediately commits the holdings changes of a fill.
    pub fn apply(
        &mut self,
        taker_asset: types::Asset,
        taker_amount: U256,
        maker_asset: types::Asset,
        maker_amount: U256,
        fees: impl IntoIterator<Item = fill::FeeCharge>,
    ) -> SettlementResult<()> {
        self.stage(taker_asset, taker_amount, maker_asset, maker_amount, fees)?
            .commit();
        Ok(())
    }
}

impl FromIterator<(types::Asset, U256)> for HoldingsLedger {
    fn from_iter<T: IntoIterator<Item = (types::Asset, U256)>>(iter: T) -> Self {
        Self {
            balances: iter.into_iter().collect(),
        }
    }
}

impl StagedUpdate<'_> {
    /// Post-fill balances of every asset the update touches.
    pub fn balances(&self) -> &[(types::Asset, U256)] {
        &self.balances
    }

    /// Writes the staged balances.
    pub fn commit(self) {
        self.ledger.balances.extend(self.balances);
    }
}
