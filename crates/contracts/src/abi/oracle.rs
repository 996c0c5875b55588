use alloy_sol_types::sol;

sol! {
    #![sol(all_derives)]

    /// An L2 output proposed to L1.
    #[sol(all_derives)]
    struct OutputProposal {
        bytes32 outputRoot;
        uint128 timestamp;
        uint128 l2BlockNumber;
    }

    /// The L2 output oracle.
    #[sol(rpc, all_derives)]
    interface IL2OutputOracle {
        function latestBlockNumber() external view returns (uint256);
        function getL2OutputIndexAfter(uint256 _l2BlockNumber) external view returns (uint256);
        function getL2Output(uint256 _l2OutputIndex) external view returns (OutputProposal memory);
        function FINALIZATION_PERIOD_SECONDS() external view returns (uint256);
    }
}
