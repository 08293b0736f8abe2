use alloy::primitives::{Address, U256};
use tracing::info;

use super::*;

/// Token movement requested from a [`TransferEffector`].
#[derive(Clone, Copy, derive_more::Debug, PartialEq, Eq)]
#[debug("{amount} of {asset}: {from} -> {to}")]
pub struct Transfer {
    pub asset: types::Asset,
    pub from: Address,
    pub to: Address,
    pub amount: U256,
}

/// Transfer effector failure, aborts the fill before the ledger is updated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{transfer:?} failed: {reason}")]
pub struct TransferError {
    pub transfer: Transfer,
    pub reason: String,
}

/// Moves tokens on behalf of the vault.
///
/// Called once per nonzero leg of a fill after every check has passed and
/// before the ledger update is committed. Implementations are expected to be
/// atomic per call, the engine never retries a failed transfer.
pub trait TransferEffector {
    fn transfer(
        &mut self,
        asset: types::Asset,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TransferError>;
}

impl<E: TransferEffector + ?Sized> TransferEffector for &mut E {
    fn transfer(
        &mut self,
        asset: types::Asset,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TransferError> {
        (**self).transfer(asset, from, to, amount)
    }
}

/// Effector that only logs transfers, for dry runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingEffector;

impl TransferEffector for LoggingEffector {
    fn transfer(
        &mut self,
        asset: types::Asset,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TransferError> {
        info!(%asset, %from, %to, %amount, "Transfer");
        Ok(())
    }
}

/// Transfers settling a fill, in execution order: taker asset to the maker,
/// maker asset to the vault, protocol fee to the exchange, taker and maker
/// fees to the fee recipient. Zero legs are skipped.
///
/// The maker asset arrives before any fee leaves, fees in the maker asset
/// are paid out of it.
pub(crate) fn fill_transfers(
    plan: &fill::FillPlan,
    order: &types::Order,
    vault: Address,
    exchange: Address,
) -> Vec<Transfer> {
    let amounts = plan.amounts();
    let fees = plan.fees();
    let principal = |asset, from, to, amount: U256| {
        (!amount.is_zero()).then_some(Transfer {
            asset,
            from,
            to,
            amount,
        })
    };
    let fee = |charge: Option<fill::FeeCharge>, to| {
        charge.map(|c| Transfer {
            asset: c.asset,
            from: vault,
            to,
            amount: c.amount,
        })
    };

    [
        principal(
            plan.taker_asset(),
            vault,
            order.maker_address,
            amounts.taker_fill_amount,
        ),
        principal(
            plan.maker_asset(),
            order.maker_address,
            vault,
            amounts.maker_fill_amount,
        ),
        fee(fees.protocol, exchange),
        fee(fees.taker, order.fee_recipient_address),
        fee(fees.maker, order.fee_recipient_address),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FEE_RECIPIENT, MAKER, MLN, OrderBuilder, WETH, ether};

    #[test]
    fn test_fill_transfers() {
        let vault = Address::repeat_byte(0x0a);
        let exchange = Address::repeat_byte(0xee);
        let request = OrderBuilder::new(MLN, ether("1"), WETH, ether("0.05"))
            .taker_fee(WETH, ether("0.001"))
            .full_fill()
            .with_protocol_fee(ether("0.0003"));
        let plan = fill::FillPlan::new(&request).unwrap();

        assert_eq!(
            fill_transfers(&plan, &request.order, vault, exchange),
            vec![
                Transfer {
                    asset: WETH,
                    from: vault,
                    to: MAKER,
                    amount: ether("0.05"),
                },
                Transfer {
                    asset: MLN,
                    from: MAKER,
                    to: vault,
                    amount: ether("1"),
                },
                Transfer {
                    asset: WETH,
                    from: vault,
                    to: exchange,
                    amount: ether("0.0003"),
                },
                Transfer {
                    asset: WETH,
                    from: vault,
                    to: FEE_RECIPIENT,
                    amount: ether("0.001"),
                },
            ]
        );
    }

    #[test]
    fn test_zero_maker_amount_skipped() {
        let request =
            OrderBuilder::new(MLN, U256::from(1), WETH, U256::from(3)).fill(U256::from(1));
        let plan = fill::FillPlan::new(&request).unwrap();
        let transfers = fill_transfers(&plan, &request.order, Address::ZERO, Address::ZERO);
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].asset, WETH);
    }
}
