//! Cross-domain messaging for the Thanos bridge: the messenger and portal clients, message status
//! resolution and the status polling workflow.

mod client;
pub use client::{BridgeClient, L1Contracts, DEFAULT_LOG_QUERY_BLOCK_RANGE};

mod error;
pub use error::{MessengerError, MessengerResult};

mod gas;
pub use gas::{estimate_l2_gas_cost, L2GasProvider};

mod messenger;
pub use messenger::{CrossChainMessenger, ThanosMessenger};

mod metrics;
pub use metrics::MessengerMetrics;

mod portal;
pub use portal::{Portal, Portals};

mod prover;
pub use prover::WithdrawalProof;

mod reporter;
pub use reporter::{StatusReporter, STATUS_REPORT_INTERVAL};

pub mod status;

mod wait;
pub use wait::wait_for_status;

mod workflow;
pub use workflow::{finalize_withdrawal, WithdrawalOutcome, PROVE_CONFIRMATIONS};

#[cfg(any(test, feature = "test-utils"))]
/// Common test helpers
pub mod test_utils;
