use crate::{CrossChainMessenger, MessengerResult, StatusReporter};
use std::time::Duration;
use thanos_bridge_primitives::{
    BridgeReceipt, Layer, MessageDirection, MessageRef, MessageStatus, WaitOptions,
};

/// The confirmations awaited on the prove transaction before waiting on the challenge period.
pub const PROVE_CONFIRMATIONS: u64 = 3;

/// The receipts of an L2 to L1 message carried to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalOutcome {
    /// The receipt of the prove transaction on L1.
    pub prove: BridgeReceipt,
    /// The receipt of the finalize transaction on L1.
    pub finalize: BridgeReceipt,
    /// The final message status.
    pub status: MessageStatus,
}

/// Carries a mined L2 to L1 message to completion: waits until it can be proven, proves it,
/// waits out the challenge period while reporting its status every `report_interval`, finalizes
/// it and waits until it is relayed.
pub async fn finalize_withdrawal<M: CrossChainMessenger>(
    messenger: &M,
    message: MessageRef,
    options: &WaitOptions,
    report_interval: Duration,
) -> MessengerResult<WithdrawalOutcome> {
    let direction = MessageDirection::L2ToL1;

    tracing::info!(target: "thanos::messenger", %message, "In the challenge period, waiting for status READY_TO_PROVE");
    messenger
        .wait_for_message_status(message, direction, MessageStatus::ReadyToProve, options)
        .await?;

    tracing::info!(target: "thanos::messenger", %message, "Prove the message");
    let prove_tx = messenger.prove_message(message).await?;
    let prove = messenger.wait_for_receipt(Layer::L1, prove_tx, PROVE_CONFIRMATIONS).await?;
    tracing::info!(target: "thanos::messenger", tx_hash = %prove.transaction_hash, "Proved transaction hash (on L1)");

    let reporter = StatusReporter::new(messenger, message, direction)
        .with_from_block(options.from_block)
        .with_interval(report_interval);
    reporter
        .watch(messenger.wait_for_message_status(
            message,
            direction,
            MessageStatus::ReadyForRelay,
            options,
        ))
        .await?;

    tracing::info!(target: "thanos::messenger", %message, "Ready for relay, finalizing message now");
    let finalize_tx = messenger.finalize_message(message).await?;
    let finalize = messenger.wait_for_receipt(Layer::L1, finalize_tx, 1).await?;

    tracing::info!(target: "thanos::messenger", %message, "Waiting for status to change to RELAYED");
    let status = messenger
        .wait_for_message_status(message, direction, MessageStatus::Relayed, options)
        .await?;

    Ok(WithdrawalOutcome { prove, finalize, status })
}
