use alloy_eips::BlockNumberOrTag;
use alloy_json_rpc::RpcError;
use alloy_primitives::{BlockNumber, TxHash};
use alloy_provider::PendingTransactionError;
use alloy_transport::TransportErrorKind;
use thanos_bridge_primitives::{Layer, MessageRef, MessageStatus};
use thanos_contracts::ContractsError;

/// A [`Result`] that uses [`MessengerError`] as the error type.
pub type MessengerResult<T> = Result<T, MessengerError>;

/// An error that occurred while driving a bridge message.
#[derive(Debug, thiserror::Error)]
pub enum MessengerError {
    /// A provider error at the RPC level.
    #[error("execution provider rpc error: {0:?}")]
    ProviderRpc(#[from] RpcError<TransportErrorKind>),
    /// A contract call or transaction failed.
    #[error("contract error: {0}")]
    Contract(#[from] alloy_contract::Error),
    /// Waiting on a submitted transaction failed.
    #[error("pending transaction error: {0}")]
    PendingTransaction(#[from] PendingTransactionError),
    /// Bridge contract data could not be decoded.
    #[error(transparent)]
    Contracts(#[from] ContractsError),
    /// The transaction has no receipt yet.
    #[error("missing receipt for transaction {tx_hash} on {layer}")]
    MissingReceipt {
        /// The layer the transaction was sent to.
        layer: Layer,
        /// The transaction hash.
        tx_hash: TxHash,
    },
    /// The source transaction did not emit the referenced message.
    #[error("no bridge message found for {0}")]
    MessageNotFound(MessageRef),
    /// The requested block does not exist.
    #[error("unknown block {0} on {1}")]
    MissingBlock(BlockNumberOrTag, Layer),
    /// No output covering the L2 block has been proposed yet.
    #[error("no output proposed for l2 block {0}")]
    OutputNotProposed(BlockNumber),
    /// The node returned no storage proof for the withdrawal slot.
    #[error("missing storage proof for withdrawal")]
    MissingStorageProof,
    /// The message is not in the status required by the operation.
    #[error("message {message} is {actual}, expected {expected}")]
    UnexpectedStatus {
        /// The message.
        message: MessageRef,
        /// The required status.
        expected: MessageStatus,
        /// The observed status.
        actual: MessageStatus,
    },
    /// The message did not reach the target status in time.
    #[error("timed out waiting for status {target}, last status {}", display_status(.last))]
    Timeout {
        /// The awaited status.
        target: MessageStatus,
        /// The last observed status, if any query completed.
        last: Option<MessageStatus>,
    },
    /// The transaction request is missing fields required to encode it.
    #[error("incomplete transaction request")]
    IncompleteTransaction,
    /// The transaction was mined but reverted.
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
}

fn display_status(status: &Option<MessageStatus>) -> String {
    status.map_or_else(|| "unknown".to_string(), |status| status.to_string())
}
