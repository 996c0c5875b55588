use alloy_primitives::{BlockHash, BlockNumber, TxHash, U256};

/// The chain agnostic summary of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeReceipt {
    /// The transaction hash.
    pub transaction_hash: TxHash,
    /// The block the transaction was included in.
    pub block_number: Option<BlockNumber>,
    /// The hash of the block the transaction was included in.
    pub block_hash: Option<BlockHash>,
    /// The gas used by the transaction.
    pub gas_used: u64,
    /// The price paid per unit of gas.
    pub effective_gas_price: u128,
    /// Whether the transaction executed successfully.
    pub success: bool,
}

impl BridgeReceipt {
    /// Returns the execution cost of the transaction: `gas_used * effective_gas_price`.
    pub fn execution_cost(&self) -> U256 {
        U256::from(self.gas_used) * U256::from(self.effective_gas_price)
    }
}
