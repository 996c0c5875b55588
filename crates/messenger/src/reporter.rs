use crate::CrossChainMessenger;
use alloy_primitives::BlockNumber;
use std::{convert::Infallible, future::Future, time::Duration};
use thanos_bridge_primitives::{MessageDirection, MessageRef};
use tokio::time::{Instant, MissedTickBehavior};

/// The interval between two status reports.
pub const STATUS_REPORT_INTERVAL: Duration = Duration::from_secs(3);

/// Periodically logs the status of a message while a wait on it is in progress.
///
/// The reporter runs inside the future of the watched wait: it stops with the wait, whatever its
/// outcome, and never reports after it settled.
#[derive(Debug)]
pub struct StatusReporter<M> {
    messenger: M,
    message: MessageRef,
    direction: MessageDirection,
    from_block: Option<BlockNumber>,
    interval: Duration,
}

impl<M: CrossChainMessenger> StatusReporter<M> {
    /// Returns a new [`StatusReporter`] for the message.
    pub const fn new(messenger: M, message: MessageRef, direction: MessageDirection) -> Self {
        Self { messenger, message, direction, from_block: None, interval: STATUS_REPORT_INTERVAL }
    }

    /// Sets the block from which relays are searched when querying the status.
    pub const fn with_from_block(mut self, from_block: Option<BlockNumber>) -> Self {
        self.from_block = from_block;
        self
    }

    /// Sets the report interval.
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Drives `wait` to completion, reporting the message status every interval meanwhile.
    pub async fn watch<F: Future>(&self, wait: F) -> F::Output {
        tokio::select! {
            biased;
            output = wait => output,
            never = self.run() => match never {},
        }
    }

    async fn run(&self) -> Infallible {
        let mut interval = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            match self
                .messenger
                .get_message_status(self.message, self.direction, self.from_block)
                .await
            {
                Ok(status) => {
                    tracing::info!(target: "thanos::reporter", message = %self.message, %status, "Message status")
                }
                Err(err) => {
                    tracing::warn!(target: "thanos::reporter", message = %self.message, ?err, "Failed to query message status")
                }
            }
        }
    }
}
