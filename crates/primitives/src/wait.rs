use alloy_primitives::BlockNumber;
use std::time::Duration;

/// The default interval between two message status queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(4);

/// Options when waiting on a message status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// The destination chain block from which relay logs are searched. Avoids scanning from
    /// genesis.
    pub from_block: Option<BlockNumber>,
    /// The interval between two status queries.
    pub poll_interval: Duration,
    /// The maximum wait duration. `None`, the default, waits until the status is reached, which
    /// for withdrawals spans the whole challenge period.
    pub timeout: Option<Duration>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self { from_block: None, poll_interval: DEFAULT_POLL_INTERVAL, timeout: None }
    }
}

impl WaitOptions {
    /// Sets the block from which relay logs are searched.
    pub const fn with_from_block(mut self, block: BlockNumber) -> Self {
        self.from_block = Some(block);
        self
    }

    /// Sets the poll interval.
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the timeout. `None` waits forever.
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
