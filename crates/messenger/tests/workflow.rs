//! Integration tests of the withdrawal workflow.
#![cfg(feature = "test-utils")]

use alloy_primitives::TxHash;
use std::time::Duration;
use thanos_bridge_primitives::{Layer, MessageDirection, MessageRef, MessageStatus, WaitOptions};
use thanos_messenger::{
    finalize_withdrawal,
    test_utils::{init_test_tracing, MockCall, MockMessenger},
    CrossChainMessenger, MessengerError, PROVE_CONFIRMATIONS,
};

// long enough for the reporter to never consume scripted statuses.
const REPORT_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

fn message() -> MessageRef {
    MessageRef::from(TxHash::with_last_byte(1))
}

#[tokio::test(start_paused = true)]
async fn test_withdrawal_proves_and_finalizes_in_order() -> eyre::Result<()> {
    init_test_tracing();

    // Given
    let messenger = MockMessenger::new([
        MessageStatus::StateRootNotPublished,
        MessageStatus::ReadyToProve,
        MessageStatus::InChallengePeriod,
        MessageStatus::InChallengePeriod,
        MessageStatus::ReadyForRelay,
        MessageStatus::Relayed,
    ]);

    // When
    let outcome =
        finalize_withdrawal(&messenger, message(), &WaitOptions::default(), REPORT_INTERVAL)
            .await?;

    // Then
    assert_eq!(outcome.status, MessageStatus::Relayed);
    assert_ne!(outcome.prove.transaction_hash, outcome.finalize.transaction_hash);
    assert_eq!(
        messenger.calls(),
        vec![
            MockCall::ProveMessage(MessageStatus::ReadyToProve),
            MockCall::WaitForReceipt(Layer::L1, PROVE_CONFIRMATIONS),
            MockCall::FinalizeMessage(MessageStatus::ReadyForRelay),
            MockCall::WaitForReceipt(Layer::L1, 1),
        ]
    );
    assert_eq!(messenger.status_queries(), 6);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_withdrawal_waits_out_a_week_long_challenge_period() -> eyre::Result<()> {
    // Given
    let challenge_period = Duration::from_secs(7 * 24 * 60 * 60);
    let options = WaitOptions::default();
    let polls = usize::try_from(challenge_period.as_secs() / options.poll_interval.as_secs())?;
    let messenger = MockMessenger::new(
        std::iter::once(MessageStatus::ReadyToProve)
            .chain(std::iter::repeat_n(MessageStatus::InChallengePeriod, polls))
            .chain([MessageStatus::ReadyForRelay, MessageStatus::Relayed]),
    );
    let start = tokio::time::Instant::now();

    // When
    let outcome =
        finalize_withdrawal(&messenger, message(), &options, 2 * challenge_period).await?;

    // Then
    assert_eq!(outcome.status, MessageStatus::Relayed);
    assert!(start.elapsed() >= challenge_period);
    assert_eq!(
        messenger.calls(),
        vec![
            MockCall::ProveMessage(MessageStatus::ReadyToProve),
            MockCall::WaitForReceipt(Layer::L1, PROVE_CONFIRMATIONS),
            MockCall::FinalizeMessage(MessageStatus::ReadyForRelay),
            MockCall::WaitForReceipt(Layer::L1, 1),
        ]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_withdrawal_fails_without_finalizing_on_timeout() -> eyre::Result<()> {
    // Given
    let messenger = MockMessenger::new([
        MessageStatus::ReadyToProve,
        MessageStatus::InChallengePeriod,
    ]);
    let options = WaitOptions::default().with_timeout(Some(Duration::from_secs(60)));

    // When
    let result = finalize_withdrawal(&messenger, message(), &options, REPORT_INTERVAL).await;

    // Then
    assert!(matches!(
        result,
        Err(MessengerError::Timeout { target: MessageStatus::ReadyForRelay, .. })
    ));
    assert_eq!(
        messenger.calls(),
        vec![
            MockCall::ProveMessage(MessageStatus::ReadyToProve),
            MockCall::WaitForReceipt(Layer::L1, PROVE_CONFIRMATIONS),
        ]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_deposit_wait_returns_once_relayed() -> eyre::Result<()> {
    // Given
    let messenger = MockMessenger::new([
        MessageStatus::UnconfirmedL1ToL2Message,
        MessageStatus::UnconfirmedL1ToL2Message,
        MessageStatus::Relayed,
    ]);

    // When
    let status = messenger
        .wait_for_message_status(
            message(),
            MessageDirection::L1ToL2,
            MessageStatus::Relayed,
            &WaitOptions::default(),
        )
        .await?;

    // Then
    assert_eq!(status, MessageStatus::Relayed);
    assert_eq!(messenger.status_queries(), 3);
    assert!(messenger
        .get_message_receipt(message(), MessageDirection::L1ToL2, None)
        .await?
        .is_some());

    Ok(())
}
