use alloy::primitives::{Address, U256};
use tracing::{debug, info, warn};

use super::*;

/// Fund vault custodying assets and taking orders on a single venue.
///
/// The vault owns its holdings ledger exclusively, fills are settled one at a
/// time through `&mut self`. Use [`Vaults`] to share vaults between tasks.
#[derive(Clone, Debug)]
pub struct Vault {
    id: types::VaultId,
    address: Address,
    venue: Venue,
    ledger: HoldingsLedger,
}

impl Vault {
    pub fn new(id: types::VaultId, address: Address, venue: Venue) -> Self {
        Self {
            id,
            address,
            venue,
            ledger: HoldingsLedger::new(),
        }
    }

    pub fn with_holdings(mut self, ledger: HoldingsLedger) -> Self {
        self.ledger = ledger;
        self
    }

    /// ID of the vault.
    pub fn id(&self) -> types::VaultId {
        self.id
    }

    /// Vault address, source of the taker asset and fees, destination of
    /// the maker asset.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn venue(&self) -> &Venue {
        &self.venue
    }

    /// Holdings of the vault.
    pub fn holdings(&self) -> &HoldingsLedger {
        &self.ledger
    }

    /// Current holdings of the asset.
    pub fn balance(&self, asset: types::Asset) -> U256 {
        self.ledger.balance(asset)
    }

    /// Records assets received by the vault outside of trading, such as an
    /// investor subscription.
    pub fn deposit(&mut self, asset: types::Asset, amount: U256) -> SettlementResult<()> {
        self.ledger.credit(asset, amount)?;
        debug!(vault_id = self.id, %asset, %amount, "Deposit recorded");
        Ok(())
    }

    /// Value of all holdings in the quote asset.
    pub fn value_in<P: PriceSource + ?Sized>(
        &self,
        prices: &P,
        quote: types::Asset,
    ) -> SettlementResult<U256> {
        holdings_value(&self.ledger, prices, quote)
    }

    /// Takes (part of) an order.
    ///
    /// Validates the request, computes the fill amounts, checks the holdings
    /// can cover every debit, requests the token transfers and commits the
    /// ledger update. Any failure leaves the holdings untouched.
    pub fn take_order<E: TransferEffector>(
        &mut self,
        request: &types::FillRequest,
        mut effector: E,
    ) -> SettlementResult<fill::FillRecord> {
        let result = self.settle(request, &mut effector);
        if let Err(e) = &result {
            warn!(vault_id = self.id, %e, "Fill rejected");
        }
        result
    }

    fn settle<E: TransferEffector>(
        &mut self,
        request: &types::FillRequest,
        effector: &mut E,
    ) -> SettlementResult<fill::FillRecord> {
        let plan = fill::FillPlan::new(request)?;
        debug!(vault_id = self.id, ?plan, "Fill planned");

        let exchange = self.venue.exchange();
        let transfers = transfer::fill_transfers(&plan, &request.order, self.address, exchange);

        let staged = self.ledger.stage(
            plan.taker_asset(),
            plan.amounts().taker_fill_amount,
            plan.maker_asset(),
            plan.amounts().maker_fill_amount,
            plan.fees().iter().copied(),
        )?;
        debug!(vault_id = self.id, balances = ?staged.balances(), "Holdings update staged");

        for t in transfers {
            effector.transfer(t.asset, t.from, t.to, t.amount)?;
        }
        staged.commit();

        let record = plan.record(exchange);
        info!(
            vault_id = self.id,
            bought_asset = %record.bought_asset,
            bought_amount = %record.bought_amount,
            sold_asset = %record.sold_asset,
            sold_amount = %record.sold_amount,
            fees = record.fees.len(),
            "Order filled"
        );
        Ok(record)
    }
}
