use alloy_primitives::{Address, Bytes, U256};

/// The gas limit used for portal deposits and withdrawals when none is provided.
pub const DEFAULT_PORTAL_GAS_LIMIT: u64 = 200_000;

/// A raw deposit through the portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositTransactionRequest {
    /// The L2 recipient.
    pub to: Address,
    /// The amount of native token minted on L2, pulled from the sender on L1.
    pub mint: U256,
    /// The value sent to the recipient on L2.
    pub value: U256,
    /// The L2 gas limit.
    pub gas_limit: u64,
    /// Whether the deposit creates a contract.
    pub is_creation: bool,
    /// The L2 calldata.
    pub data: Bytes,
}

impl DepositTransactionRequest {
    /// Returns a plain value transfer of `amount` to `to`, minting the same amount on L2.
    pub fn transfer(to: Address, amount: U256) -> Self {
        Self {
            to,
            mint: amount,
            value: amount,
            gas_limit: DEFAULT_PORTAL_GAS_LIMIT,
            is_creation: false,
            data: Bytes::new(),
        }
    }
}

/// A raw withdrawal through the L2 message passer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalRequest {
    /// The L1 recipient.
    pub target: Address,
    /// The native token value withdrawn.
    pub value: U256,
    /// The L1 gas limit for the withdrawal execution.
    pub gas_limit: u64,
    /// The L1 calldata.
    pub data: Bytes,
}

impl WithdrawalRequest {
    /// Returns a plain value withdrawal of `amount` to `target`.
    pub fn transfer(target: Address, amount: U256) -> Self {
        Self { target, value: amount, gas_limit: DEFAULT_PORTAL_GAS_LIMIT, data: Bytes::new() }
    }
}
