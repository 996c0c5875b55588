//! Thanos bridge binary

use clap::Parser;
use thanos_bridge::Cli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing_subscriber();

    if let Err(err) = thanos_bridge::run(Cli::parse()).await {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber, logging at `info` unless `RUST_LOG` says otherwise.
fn init_tracing_subscriber() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(false)
                .with_ansi(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
