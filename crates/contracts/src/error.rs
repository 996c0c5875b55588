use alloy_primitives::{B256, U256};

/// An error decoding or encoding bridge contract data.
#[derive(Debug, thiserror::Error)]
pub enum ContractsError {
    /// The message nonce carries a version this client cannot hash.
    #[error("unsupported cross-domain message version {0}")]
    UnsupportedMessageVersion(u16),
    /// The deposit event carries an unknown version.
    #[error("unsupported deposit version {0}")]
    UnsupportedDepositVersion(U256),
    /// The deposit opaque data is shorter than its fixed prefix.
    #[error("invalid deposit opaque data length {0}")]
    InvalidOpaqueData(usize),
    /// The withdrawal hash emitted on L2 differs from the one computed locally.
    #[error("withdrawal hash mismatch: computed {computed}, emitted {emitted}")]
    WithdrawalHashMismatch {
        /// The locally computed hash.
        computed: B256,
        /// The hash emitted by the message passer.
        emitted: B256,
    },
    /// A log is missing its log index.
    #[error("missing log index")]
    MissingLogIndex,
    /// A log is missing its block hash.
    #[error("missing block hash for log")]
    MissingBlockHash,
    /// Failed to decode a log.
    #[error("failed to decode {log_type}: {error}")]
    DecodeLog {
        /// The log type.
        log_type: &'static str,
        /// The decoding error.
        error: alloy_sol_types::Error,
    },
}
