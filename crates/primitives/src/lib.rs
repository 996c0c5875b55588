//! Primitive types shared across the Thanos bridge client.

pub use gas::GasCostReport;
mod gas;

pub use layer::{Layer, MessageDirection};
mod layer;

pub use message::{MessageReceipt, MessageRef, RelayOutcome};
mod message;

pub use portal::{DepositTransactionRequest, WithdrawalRequest, DEFAULT_PORTAL_GAS_LIMIT};
mod portal;

pub use receipt::BridgeReceipt;
mod receipt;

pub use status::{InvalidMessageStatus, MessageStatus};
mod status;

pub use wait::{WaitOptions, DEFAULT_POLL_INTERVAL};
mod wait;
