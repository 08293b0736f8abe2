//! Fill proportion calculator.

use alloy::primitives::U256;

use crate::{
    error::{SettlementError, SettlementResult},
    num,
    types::Order,
};

/// Amounts moved by a single fill.
#[derive(Clone, Copy, derive_more::Debug, PartialEq, Eq)]
pub struct FillAmounts {
    /// Maker asset received.
    #[debug("{maker_fill_amount}")]
    pub maker_fill_amount: U256,

    /// Taker asset given up, excluding fees.
    #[debug("{taker_fill_amount}")]
    pub taker_fill_amount: U256,

    /// Taker fee charged, in the taker fee asset.
    #[debug("{taker_fee_fill_amount}")]
    pub taker_fee_fill_amount: U256,

    /// Maker fee charged, in the maker fee asset.
    #[debug("{maker_fee_fill_amount}")]
    pub maker_fee_fill_amount: U256,

    /// Protocol fee charged, in the taker asset.
    #[debug("{protocol_fee}")]
    pub protocol_fee: U256,
}

/// Scales the order amounts to the taker fill quantity.
///
/// A full fill takes the order amounts as they are. A partial fill scales
/// maker amount and both order fees by `fill_taker_quantity / taker_asset_amount`
/// rounding down, so the vault never pays more than its proportional share.
/// The protocol fee is a fixed per-fill amount and is passed through.
pub fn compute_fill(
    order: &Order,
    fill_taker_quantity: U256,
    protocol_fee: U256,
) -> SettlementResult<FillAmounts> {
    let proportion = num::Proportion::new(fill_taker_quantity, order.taker_asset_amount)
        .filter(|_| order.covers(fill_taker_quantity))
        .ok_or(SettlementError::FillExceedsOrderCapacity {
            requested: fill_taker_quantity,
            capacity: order.taker_asset_amount,
        })?;
    let scale = |total| {
        proportion
            .scale(total)
            .ok_or(SettlementError::ArithmeticOverflow)
    };

    Ok(FillAmounts {
        maker_fill_amount: scale(order.maker_asset_amount)?,
        taker_fill_amount: fill_taker_quantity,
        taker_fee_fill_amount: scale(order.taker_fee)?,
        maker_fee_fill_amount: scale(order.maker_fee)?,
        protocol_fee,
    })
}

/// Protocol fee of a fill, `multiplier * gas_price`.
pub fn protocol_fee(multiplier: U256, gas_price: U256) -> SettlementResult<U256> {
    multiplier
        .checked_mul(gas_price)
        .ok_or(SettlementError::ArithmeticOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MLN, OrderBuilder, WETH, ether};

    fn order() -> Order {
        OrderBuilder::new(MLN, ether("1"), WETH, ether("0.05"))
            .taker_fee(WETH, ether("0.001"))
            .maker_fee(MLN, ether("0.003"))
            .build()
    }

    #[test]
    fn test_full_fill_is_exact() {
        let order = order();
        let amounts = compute_fill(&order, order.taker_asset_amount, U256::from(7)).unwrap();
        assert_eq!(
            amounts,
            FillAmounts {
                maker_fill_amount: order.maker_asset_amount,
                taker_fill_amount: order.taker_asset_amount,
                taker_fee_fill_amount: order.taker_fee,
                maker_fee_fill_amount: order.maker_fee,
                protocol_fee: U256::from(7),
            }
        );
    }

    #[test]
    fn test_half_fill() {
        let amounts = compute_fill(&order(), ether("0.025"), U256::from(7)).unwrap();
        assert_eq!(amounts.maker_fill_amount, ether("0.5"));
        assert_eq!(amounts.taker_fill_amount, ether("0.025"));
        assert_eq!(amounts.taker_fee_fill_amount, ether("0.0005"));
        assert_eq!(amounts.maker_fee_fill_amount, ether("0.0015"));
        // Not scaled.
        assert_eq!(amounts.protocol_fee, U256::from(7));
    }

    #[test]
    fn test_partial_fill_rounds_down() {
        let order = OrderBuilder::new(MLN, U256::from(7), WETH, U256::from(3))
            .taker_fee(WETH, U256::from(5))
            .build();

        let amounts = compute_fill(&order, U256::from(1), U256::ZERO).unwrap();
        assert_eq!(amounts.maker_fill_amount, U256::from(2));
        assert_eq!(amounts.taker_fee_fill_amount, U256::from(1));

        let amounts = compute_fill(&order, U256::from(2), U256::ZERO).unwrap();
        assert_eq!(amounts.maker_fill_amount, U256::from(4));
        assert_eq!(amounts.taker_fee_fill_amount, U256::from(3));
    }

    #[test]
    fn test_partial_fill_matches_floor_for_every_quantity() {
        let order = OrderBuilder::new(MLN, U256::from(1_000_003), WETH, U256::from(97))
            .taker_fee(WETH, U256::from(13))
            .maker_fee(MLN, U256::from(101))
            .build();
        for q in 1..97u64 {
            let amounts = compute_fill(&order, U256::from(q), U256::ZERO).unwrap();
            assert_eq!(amounts.maker_fill_amount, U256::from(1_000_003 * q / 97));
            assert_eq!(amounts.taker_fee_fill_amount, U256::from(13 * q / 97));
            assert_eq!(amounts.maker_fee_fill_amount, U256::from(101 * q / 97));
        }
    }

    #[test]
    fn test_overflow_is_reported() {
        let order = OrderBuilder::new(MLN, U256::MAX, WETH, U256::from(3)).build();
        assert_eq!(
            compute_fill(&order, U256::from(2), U256::ZERO),
            Err(SettlementError::ArithmeticOverflow)
        );
        // Full fill does not multiply.
        assert_eq!(
            compute_fill(&order, U256::from(3), U256::ZERO)
                .unwrap()
                .maker_fill_amount,
            U256::MAX
        );
    }

    #[test]
    fn test_quantity_above_order_amount() {
        let order = order();
        assert!(matches!(
            compute_fill(&order, ether("0.06"), U256::ZERO),
            Err(SettlementError::FillExceedsOrderCapacity { .. })
        ));
    }

    #[test]
    fn test_protocol_fee() {
        assert_eq!(
            protocol_fee(U256::from(150_000), U256::from(2_000_000_000u64)).unwrap(),
            ether("0.0003")
        );
        assert_eq!(
            protocol_fee(U256::MAX, U256::from(2)),
            Err(SettlementError::ArithmeticOverflow)
        );
    }
}
