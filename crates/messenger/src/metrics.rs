use metrics::{Counter, Histogram};
use metrics_derive::Metrics;
use thanos_bridge_primitives::Layer;

/// The metrics for the [`super::BridgeClient`].
#[derive(Metrics)]
#[metrics(scope = "bridge_messenger")]
pub struct MessengerMetrics {
    /// A counter on the message status queries.
    pub status_queries: Counter,
    /// A counter on the transactions submitted to L1.
    pub l1_transactions: Counter,
    /// A counter on the transactions submitted to L2.
    pub l2_transactions: Counter,
    /// A histogram of the time spent waiting on receipts, in seconds.
    pub receipt_wait_duration: Histogram,
    /// A histogram of the time spent waiting on message statuses, in seconds.
    pub status_wait_duration: Histogram,
}

impl MessengerMetrics {
    /// Records a transaction submitted to the provided layer.
    pub fn submitted(&self, layer: Layer) {
        match layer {
            Layer::L1 => self.l1_transactions.increment(1),
            Layer::L2 => self.l2_transactions.increment(1),
        }
    }
}
