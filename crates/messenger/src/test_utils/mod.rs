/// Test utils for the messenger.
pub mod messenger;
pub use messenger::{MockCall, MockMessenger};

/// Test utils for the providers.
pub mod provider;
pub use provider::{mock_client, mock_log, MockBridgeClient, MockResponses, MOCK_CONTRACTS};

/// Installs a test writer subscriber filtered by `RUST_LOG`. Subsequent calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
