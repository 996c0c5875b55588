use alloy_primitives::TxHash;

/// A reference to a bridge message: the `index`-th message emitted by the source transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    /// The hash of the transaction that sent the message.
    pub tx_hash: TxHash,
    /// The index of the message within the transaction.
    pub index: usize,
}

impl MessageRef {
    /// Returns a new [`MessageRef`].
    pub const fn new(tx_hash: TxHash, index: usize) -> Self {
        Self { tx_hash, index }
    }
}

impl From<TxHash> for MessageRef {
    fn from(tx_hash: TxHash) -> Self {
        Self::new(tx_hash, 0)
    }
}

impl std::fmt::Display for MessageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.tx_hash, self.index)
    }
}

/// The outcome of a relay attempt on the destination chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The message was executed successfully.
    Relayed,
    /// The message execution failed and can be retried.
    Failed,
}

/// A relay of a message on the destination chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageReceipt {
    /// The relay outcome.
    pub outcome: RelayOutcome,
    /// The relay transaction, when recovered from the destination chain logs.
    pub transaction_hash: Option<TxHash>,
}
