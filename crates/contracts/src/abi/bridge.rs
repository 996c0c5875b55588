use alloy_sol_types::sol;

sol! {
    /// The L1 standard bridge.
    #[sol(rpc, all_derives)]
    interface IL1StandardBridge {
        function bridgeETHTo(address _to, uint32 _minGasLimit, bytes calldata _extraData) external payable;
        function bridgeERC20To(
            address _localToken,
            address _remoteToken,
            address _to,
            uint256 _amount,
            uint32 _minGasLimit,
            bytes calldata _extraData
        ) external;
        function bridgeNativeTokenTo(
            address _to,
            uint256 _amount,
            uint32 _minGasLimit,
            bytes calldata _extraData
        ) external;
    }

    /// The L2 standard bridge predeploy.
    #[sol(rpc, all_derives)]
    interface IL2StandardBridge {
        function withdrawTo(
            address _l2Token,
            address _to,
            uint256 _amount,
            uint32 _minGasLimit,
            bytes calldata _extraData
        ) external payable;
    }
}
