use alloy_sol_types::sol;

sol! {
    #![sol(all_derives)]

    /// A withdrawal as seen by the portal.
    #[sol(all_derives)]
    struct WithdrawalTransaction {
        uint256 nonce;
        address sender;
        address target;
        uint256 value;
        uint256 gasLimit;
        bytes data;
    }

    /// The preimage of an L2 output root.
    #[sol(all_derives)]
    struct OutputRootProof {
        bytes32 version;
        bytes32 stateRoot;
        bytes32 messagePasserStorageRoot;
        bytes32 latestBlockhash;
    }

    /// The portal on L1. On Thanos, deposits mint the L2 native token pulled from the sender.
    #[sol(rpc, all_derives)]
    interface IOptimismPortal {
        event TransactionDeposited(address indexed from, address indexed to, uint256 indexed version, bytes opaqueData);
        event WithdrawalProven(bytes32 indexed withdrawalHash, address indexed from, address indexed to);
        event WithdrawalFinalized(bytes32 indexed withdrawalHash, bool success);

        function depositTransaction(
            address _to,
            uint256 _mint,
            uint256 _value,
            uint64 _gasLimit,
            bool _isCreation,
            bytes calldata _data
        ) external;
        function proveWithdrawalTransaction(
            WithdrawalTransaction memory _tx,
            uint256 _l2OutputIndex,
            OutputRootProof calldata _outputRootProof,
            bytes[] calldata _withdrawalProof
        ) external;
        function finalizeWithdrawalTransaction(WithdrawalTransaction memory _tx) external;
        function provenWithdrawals(bytes32 withdrawalHash)
            external view returns (bytes32 outputRoot, uint128 timestamp, uint128 l2OutputIndex);
        function finalizedWithdrawals(bytes32 withdrawalHash) external view returns (bool);
    }
}
