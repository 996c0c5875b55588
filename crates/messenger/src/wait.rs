use crate::{MessengerError, MessengerResult};
use std::{future::Future, time::Duration};
use thanos_bridge_primitives::{MessageStatus, WaitOptions};

/// Polls `query` every [`WaitOptions::poll_interval`] until the returned status reaches `target`.
///
/// Returns the first status at or past the target, or the first error returned by the query.
/// Fails with [`MessengerError::Timeout`] once [`WaitOptions::timeout`] elapsed, including while
/// a query is in flight.
pub async fn wait_for_status<F, Fut>(
    mut query: F,
    target: MessageStatus,
    options: &WaitOptions,
) -> MessengerResult<MessageStatus>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = MessengerResult<MessageStatus>>,
{
    let mut last = None;
    let poll = poll_until(&mut query, target, options.poll_interval, &mut last);
    let Some(timeout) = options.timeout else { return poll.await };

    let result = tokio::time::timeout(timeout, poll).await;
    result.unwrap_or(Err(MessengerError::Timeout { target, last }))
}

async fn poll_until<F, Fut>(
    query: &mut F,
    target: MessageStatus,
    interval: Duration,
    last: &mut Option<MessageStatus>,
) -> MessengerResult<MessageStatus>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = MessengerResult<MessageStatus>>,
{
    loop {
        let status = query().await?;
        if status.has_reached(target) {
            return Ok(status)
        }
        *last = Some(status);
        tracing::trace!(target: "thanos::messenger", %status, %target, "message status not reached");
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tokio::time::Instant;

    fn options() -> WaitOptions {
        WaitOptions::default()
            .with_poll_interval(Duration::from_secs(1))
            .with_timeout(Some(Duration::from_secs(10)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_first_status_past_target() {
        let statuses = [
            MessageStatus::StateRootNotPublished,
            MessageStatus::InChallengePeriod,
            MessageStatus::Relayed,
        ];
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let status = wait_for_status(
            move || {
                let i = counter.fetch_add(1, Ordering::SeqCst);
                async move { Ok(statuses[i]) }
            },
            MessageStatus::ReadyToProve,
            &options(),
        )
        .await
        .unwrap();

        assert_eq!(status, MessageStatus::InChallengePeriod);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_with_last_status() {
        let start = Instant::now();
        let err = wait_for_status(
            || async { Ok(MessageStatus::StateRootNotPublished) },
            MessageStatus::ReadyToProve,
            &options(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            MessengerError::Timeout {
                target: MessageStatus::ReadyToProve,
                last: Some(MessageStatus::StateRootNotPublished)
            }
        ));
        assert!(start.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_while_query_hangs() {
        let start = Instant::now();
        let calls = AtomicUsize::new(0);

        let err = wait_for_status(
            || {
                let first = calls.fetch_add(1, Ordering::SeqCst) == 0;
                async move {
                    if first {
                        return Ok(MessageStatus::InChallengePeriod)
                    }
                    std::future::pending().await
                }
            },
            MessageStatus::ReadyForRelay,
            &options(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            MessengerError::Timeout {
                target: MessageStatus::ReadyForRelay,
                last: Some(MessageStatus::InChallengePeriod)
            }
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(start.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_past_a_day_without_timeout() {
        let day = 24 * 60 * 60;
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let options = WaitOptions::default().with_poll_interval(Duration::from_secs(60));

        let status = wait_for_status(
            move || {
                let elapsed = 60 * counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    Ok(if elapsed < 2 * day {
                        MessageStatus::InChallengePeriod
                    } else {
                        MessageStatus::ReadyForRelay
                    })
                }
            },
            MessageStatus::ReadyForRelay,
            &options,
        )
        .await
        .unwrap();

        assert_eq!(status, MessageStatus::ReadyForRelay);
        assert_eq!(calls.load(Ordering::SeqCst), 2 * day / 60 + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_deposit_never_reaches_relayed() {
        let err = wait_for_status(
            || async { Ok(MessageStatus::FailedL1ToL2Message) },
            MessageStatus::Relayed,
            &options(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MessengerError::Timeout { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_propagates_query_error() {
        let err = wait_for_status(
            || async { Err(MessengerError::OutputNotProposed(1)) },
            MessageStatus::ReadyToProve,
            &options(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MessengerError::OutputNotProposed(1)));
    }
}
