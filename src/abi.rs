#[allow(clippy::too_many_arguments)]
pub mod asset_data {
    alloy::sol!(
        /// 0x v3 asset proxy encodings. Only the call shape is used, the
        /// ABI-encoded call of [`IAssetData::ERC20TokenCall`] is the
        /// `assetData` of an ERC-20 token.
        #[derive(Debug)]
        interface IAssetData {
            function ERC20Token(address tokenAddress) external;
        }
    );
}

#[allow(clippy::too_many_arguments)]
pub mod events {
    alloy::sol!(
        /// Emitted once per successful take-order fill.
        #[derive(Debug, PartialEq, Eq)]
        event OrderFilled(
            address indexed exchangeAddress,
            address buyAsset,
            uint256 buyAmount,
            address sellAsset,
            uint256 sellAmount,
            address[] feeAssets,
            uint256[] feeAmounts
        );
    );
}
