//! Order consistency checks.

use alloy::primitives::U256;

use super::decode_asset_data;
use crate::{
    error::{SettlementError, SettlementResult},
    types::{self, FillRequest},
};

/// Checks the request is consistent with the order it refers to.
///
/// Checks run in a fixed order and stop at the first failure:
///
/// 1. maker asset data decodes to the declared maker asset,
/// 2. taker asset data decodes to the declared taker asset,
/// 3. the fill quantity is nonzero and within the order's taker amount,
/// 4. for a nonzero taker fee, taker fee asset data decodes to the declared
///    taker fee asset,
/// 5. the same for the maker fee.
///
/// Fee asset data of a zero fee is not inspected.
pub fn validate(request: &FillRequest) -> SettlementResult<()> {
    let order = &request.order;

    let encoded = decode_asset_data(&order.maker_asset_data)?;
    if encoded != Some(request.maker_asset) {
        return Err(SettlementError::MakerAssetMismatch {
            declared: request.maker_asset,
            encoded,
        });
    }

    let encoded = decode_asset_data(&order.taker_asset_data)?;
    if encoded != Some(request.taker_asset) {
        return Err(SettlementError::TakerAssetMismatch {
            declared: request.taker_asset,
            encoded,
        });
    }

    if !order.covers(request.fill_taker_quantity) {
        return Err(SettlementError::FillExceedsOrderCapacity {
            requested: request.fill_taker_quantity,
            capacity: order.taker_asset_amount,
        });
    }
    if request.fill_taker_quantity.is_zero() {
        return Err(SettlementError::ZeroFillQuantity);
    }

    let mismatch = fee_asset_mismatch(
        order.taker_fee,
        &order.taker_fee_asset_data,
        request.taker_fee_asset,
    )?;
    if let Some((declared, encoded)) = mismatch {
        return Err(SettlementError::TakerFeeAssetMismatch { declared, encoded });
    }

    let mismatch = fee_asset_mismatch(
        order.maker_fee,
        &order.maker_fee_asset_data,
        request.maker_fee_asset,
    )?;
    if let Some((declared, encoded)) = mismatch {
        return Err(SettlementError::MakerFeeAssetMismatch { declared, encoded });
    }

    Ok(())
}

/// Returns declared and encoded fee assets if they disagree for a charged fee.
fn fee_asset_mismatch(
    fee: U256,
    data: &[u8],
    declared: Option<types::Asset>,
) -> SettlementResult<Option<(Option<types::Asset>, Option<types::Asset>)>> {
    if fee.is_zero() {
        return Ok(None);
    }
    let encoded = decode_asset_data(data)?;
    Ok((encoded.is_none() || encoded != declared).then_some((declared, encoded)))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Bytes, U256};

    use super::*;
    use crate::testing::{DAI, MLN, OrderBuilder, WETH, ether};

    fn order_with_weth_taker_fee() -> OrderBuilder {
        OrderBuilder::new(MLN, ether("1"), WETH, ether("0.05")).taker_fee(WETH, ether("0.001"))
    }

    #[test]
    fn test_consistent_request() {
        let request = order_with_weth_taker_fee().full_fill();
        assert_eq!(validate(&request), Ok(()));
    }

    #[test]
    fn test_maker_asset_mismatch() {
        let mut request = order_with_weth_taker_fee().full_fill();
        request.maker_asset = DAI;
        assert_eq!(
            validate(&request),
            Err(SettlementError::MakerAssetMismatch {
                declared: DAI,
                encoded: Some(MLN),
            })
        );
    }

    #[test]
    fn test_taker_asset_mismatch() {
        let mut request = order_with_weth_taker_fee().full_fill();
        request.taker_asset = DAI;
        assert_eq!(
            validate(&request),
            Err(SettlementError::TakerAssetMismatch {
                declared: DAI,
                encoded: Some(WETH),
            })
        );
    }

    #[test]
    fn test_fill_exceeds_capacity() {
        let request = order_with_weth_taker_fee().fill(ether("0.05") + U256::from(1));
        assert_eq!(
            validate(&request),
            Err(SettlementError::FillExceedsOrderCapacity {
                requested: ether("0.05") + U256::from(1),
                capacity: ether("0.05"),
            })
        );
    }

    #[test]
    fn test_zero_fill() {
        let request = order_with_weth_taker_fee().fill(U256::ZERO);
        assert_eq!(validate(&request), Err(SettlementError::ZeroFillQuantity));
    }

    #[test]
    fn test_taker_fee_asset_mismatch() {
        let mut request = order_with_weth_taker_fee().full_fill();
        request.taker_fee_asset = Some(DAI);
        assert_eq!(
            validate(&request),
            Err(SettlementError::TakerFeeAssetMismatch {
                declared: Some(DAI),
                encoded: Some(WETH),
            })
        );

        request.taker_fee_asset = None;
        assert_eq!(
            validate(&request),
            Err(SettlementError::TakerFeeAssetMismatch {
                declared: None,
                encoded: Some(WETH),
            })
        );
    }

    #[test]
    fn test_charged_fee_without_asset_data() {
        let mut request = OrderBuilder::new(MLN, ether("1"), WETH, ether("0.05")).full_fill();
        request.order.taker_fee = ether("0.001");
        assert_eq!(
            validate(&request),
            Err(SettlementError::TakerFeeAssetMismatch {
                declared: None,
                encoded: None,
            })
        );
    }

    #[test]
    fn test_maker_fee_asset_mismatch() {
        let mut request = OrderBuilder::new(MLN, ether("1"), WETH, ether("0.05"))
            .maker_fee(DAI, ether("2"))
            .full_fill();
        request.maker_fee_asset = Some(MLN);
        assert_eq!(
            validate(&request),
            Err(SettlementError::MakerFeeAssetMismatch {
                declared: Some(MLN),
                encoded: Some(DAI),
            })
        );
    }

    #[test]
    fn test_zero_fee_asset_data_ignored() {
        // Declared fee asset and garbage fee asset data do not matter when no
        // fee is charged.
        let mut request = OrderBuilder::new(MLN, ether("1"), WETH, ether("0.05")).full_fill();
        request.order.taker_fee_asset_data = Bytes::from_static(&[0xde, 0xad]);
        request.taker_fee_asset = Some(DAI);
        assert_eq!(validate(&request), Ok(()));
    }

    #[test]
    fn test_checks_short_circuit_in_order() {
        // Every check fails, the maker asset one is reported.
        let mut request = order_with_weth_taker_fee().fill(ether("1"));
        request.maker_asset = DAI;
        request.taker_asset = DAI;
        request.taker_fee_asset = Some(DAI);
        assert!(matches!(
            validate(&request),
            Err(SettlementError::MakerAssetMismatch { .. })
        ));

        // Capacity is checked before fee assets.
        request.maker_asset = MLN;
        request.taker_asset = WETH;
        assert!(matches!(
            validate(&request),
            Err(SettlementError::FillExceedsOrderCapacity { .. })
        ));
    }

    #[test]
    fn test_malformed_asset_data() {
        let mut request = order_with_weth_taker_fee().full_fill();
        request.order.maker_asset_data = Bytes::from_static(&[0x01, 0x02, 0x03]);
        assert!(matches!(
            validate(&request),
            Err(SettlementError::MalformedEncoding(_))
        ));
    }
}
