//! Integration tests of the status reporter lifecycle.
#![cfg(feature = "test-utils")]

use alloy_primitives::TxHash;
use std::time::Duration;
use thanos_bridge_primitives::{MessageDirection, MessageRef, MessageStatus, WaitOptions};
use thanos_messenger::{
    test_utils::{init_test_tracing, MockMessenger},
    CrossChainMessenger, MessengerError, StatusReporter, STATUS_REPORT_INTERVAL,
};

const DIRECTION: MessageDirection = MessageDirection::L2ToL1;

fn message() -> MessageRef {
    MessageRef::from(TxHash::with_last_byte(1))
}

fn options() -> WaitOptions {
    WaitOptions::default().with_poll_interval(Duration::from_secs(4))
}

#[tokio::test(start_paused = true)]
async fn test_reporter_stops_when_wait_succeeds() -> eyre::Result<()> {
    init_test_tracing();

    // Given
    let waited = MockMessenger::new([
        MessageStatus::InChallengePeriod,
        MessageStatus::InChallengePeriod,
        MessageStatus::InChallengePeriod,
        MessageStatus::ReadyForRelay,
    ]);
    let reported = MockMessenger::new([MessageStatus::InChallengePeriod]);
    let reporter = StatusReporter::new(&reported, message(), DIRECTION);

    // When
    let status = reporter
        .watch(waited.wait_for_message_status(
            message(),
            DIRECTION,
            MessageStatus::ReadyForRelay,
            &options(),
        ))
        .await?;

    // Then
    assert_eq!(status, MessageStatus::ReadyForRelay);
    let reports = reported.status_queries();
    assert!((3..=4).contains(&reports), "unexpected report count {reports}");

    tokio::time::sleep(10 * STATUS_REPORT_INTERVAL).await;
    assert_eq!(reported.status_queries(), reports);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reporter_stops_when_wait_fails() -> eyre::Result<()> {
    init_test_tracing();

    // Given
    let waited = MockMessenger::new([MessageStatus::InChallengePeriod]);
    let reported = MockMessenger::new([MessageStatus::InChallengePeriod]);
    let reporter = StatusReporter::new(&reported, message(), DIRECTION);
    let options = options().with_timeout(Some(Duration::from_secs(20)));

    // When
    let result = reporter
        .watch(waited.wait_for_message_status(
            message(),
            DIRECTION,
            MessageStatus::ReadyForRelay,
            &options,
        ))
        .await;

    // Then
    assert!(matches!(
        result,
        Err(MessengerError::Timeout {
            target: MessageStatus::ReadyForRelay,
            last: Some(MessageStatus::InChallengePeriod)
        })
    ));
    let reports = reported.status_queries();
    assert!(reports >= 6, "unexpected report count {reports}");

    tokio::time::sleep(10 * STATUS_REPORT_INTERVAL).await;
    assert_eq!(reported.status_queries(), reports);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_no_report_before_first_interval() -> eyre::Result<()> {
    // Given
    let waited = MockMessenger::new([MessageStatus::ReadyForRelay]);
    let reported = MockMessenger::new([MessageStatus::InChallengePeriod]);
    let reporter = StatusReporter::new(&reported, message(), DIRECTION);

    // When
    let status = reporter
        .watch(waited.wait_for_message_status(
            message(),
            DIRECTION,
            MessageStatus::ReadyForRelay,
            &options(),
        ))
        .await?;

    // Then
    assert_eq!(status, MessageStatus::ReadyForRelay);
    assert_eq!(reported.status_queries(), 0);

    Ok(())
}
