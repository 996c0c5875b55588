use alloy_sol_types::sol;

sol! {
    /// The cross-domain messenger, deployed on both layers.
    #[sol(rpc, all_derives)]
    interface ICrossDomainMessenger {
        event SentMessage(address indexed target, address sender, bytes message, uint256 messageNonce, uint256 gasLimit);
        event SentMessageExtension1(address indexed sender, uint256 value);
        event RelayedMessage(bytes32 indexed msgHash);
        event FailedRelayedMessage(bytes32 indexed msgHash);

        function successfulMessages(bytes32 msgHash) external view returns (bool);
        function failedMessages(bytes32 msgHash) external view returns (bool);
        function relayMessage(
            uint256 _nonce,
            address _sender,
            address _target,
            uint256 _value,
            uint256 _minGasLimit,
            bytes calldata _message
        ) external payable;
    }

    /// The pre-Bedrock relay encoding, used for messages with a version 0 nonce.
    #[sol(all_derives)]
    interface ILegacyCrossDomainMessenger {
        function relayMessage(address _target, address _sender, bytes memory _message, uint256 _messageNonce) external;
    }
}
