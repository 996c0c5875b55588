use alloy_sol_types::sol;

sol! {
    /// The L2 to L1 message passer predeploy.
    #[sol(rpc, all_derives)]
    interface IL2ToL1MessagePasser {
        event MessagePassed(
            uint256 indexed nonce,
            address indexed sender,
            address indexed target,
            uint256 value,
            uint256 gasLimit,
            bytes data,
            bytes32 withdrawalHash
        );

        function initiateWithdrawal(address _target, uint256 _gasLimit, bytes memory _data) external payable;
    }
}
