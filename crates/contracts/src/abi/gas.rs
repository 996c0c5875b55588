use alloy_sol_types::sol;

sol! {
    /// The L2 gas price oracle predeploy.
    #[sol(rpc, all_derives)]
    interface IGasPriceOracle {
        function getL1Fee(bytes memory _data) external view returns (uint256);
        function l1BaseFee() external view returns (uint256);
    }
}
