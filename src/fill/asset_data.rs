//! ERC-20 asset proxy encoding.

use alloy::primitives::Bytes;
use alloy_sol_types::SolCall;

use crate::{
    abi::asset_data::IAssetData::ERC20TokenCall,
    error::{SettlementError, SettlementResult},
    types,
};

/// Length of `ERC20Token(address)` asset data: selector plus one ABI word.
const ERC20_ASSET_DATA_LEN: usize = 4 + 32;

/// Decodes 0x asset data into the asset it refers to.
///
/// Empty data stands for "no asset" (an order without the corresponding
/// fee). Anything else must be the exact, canonical `ERC20Token(address)`
/// encoding, including zero padding of the address word.
pub fn decode_asset_data(data: &[u8]) -> SettlementResult<Option<types::Asset>> {
    if data.is_empty() {
        return Ok(None);
    }
    if data.len() != ERC20_ASSET_DATA_LEN {
        return Err(malformed(data));
    }
    let call = ERC20TokenCall::abi_decode(data).map_err(|_| malformed(data))?;
    // Non-strict decoding masks dirty address padding, reject it here.
    if call.abi_encode() != data {
        return Err(malformed(data));
    }
    Ok(Some(call.tokenAddress))
}

/// Encodes the asset as ERC-20 asset data.
pub fn encode_asset_data(asset: types::Asset) -> Bytes {
    ERC20TokenCall {
        tokenAddress: asset,
    }
    .abi_encode()
    .into()
}

fn malformed(data: &[u8]) -> SettlementError {
    SettlementError::MalformedEncoding(Bytes::copy_from_slice(data))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, hex};

    use super::*;

    const MLN: types::Asset = address!("0xec67005c4e498ec7f55e092bd1d35cbc47c91892");

    #[test]
    fn test_empty_decodes_to_none() {
        assert_eq!(decode_asset_data(&[]).unwrap(), None);
    }

    #[test]
    fn test_known_encoding() {
        let data = hex!(
            "f47261b0000000000000000000000000ec67005c4e498ec7f55e092bd1d35cbc47c91892"
        );
        assert_eq!(encode_asset_data(MLN).as_ref(), data.as_slice());
        assert_eq!(decode_asset_data(&data).unwrap(), Some(MLN));
    }

    #[test]
    fn test_round_trip() {
        for asset in [MLN, types::Asset::ZERO, types::Asset::repeat_byte(0xff)] {
            let data = encode_asset_data(asset);
            assert_eq!(decode_asset_data(&data).unwrap(), Some(asset));
            // Decoding is idempotent.
            assert_eq!(decode_asset_data(&data), decode_asset_data(&data));
        }
    }

    #[test]
    fn test_wrong_selector() {
        let mut data = encode_asset_data(MLN).to_vec();
        // ERC721Token(address,uint256) selector
        data[..4].copy_from_slice(&hex!("02571792"));
        assert!(matches!(
            decode_asset_data(&data),
            Err(SettlementError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_wrong_length() {
        let data = encode_asset_data(MLN);
        assert!(matches!(
            decode_asset_data(&data[..35]),
            Err(SettlementError::MalformedEncoding(_))
        ));

        let mut longer = data.to_vec();
        longer.push(0);
        assert!(matches!(
            decode_asset_data(&longer),
            Err(SettlementError::MalformedEncoding(_))
        ));

        assert!(matches!(
            decode_asset_data(&hex!("f47261b0")),
            Err(SettlementError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_dirty_address_padding() {
        let mut data = encode_asset_data(MLN).to_vec();
        data[4] = 0x01;
        assert_eq!(
            decode_asset_data(&data),
            Err(SettlementError::MalformedEncoding(Bytes::from(data)))
        );
    }
}
