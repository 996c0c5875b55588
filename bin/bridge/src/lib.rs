//! Command-line client of the Thanos bridge: deposits and withdrawals of ERC-20s, ETH and the
//! native token, through the standard bridge or the optimism portal.

mod args;
pub use args::{
    parse_private_key, Cli, Command, ContractsArgs, L1ProviderArgs, L2ProviderArgs, SignerArgs,
    TransferArgs, WaitArgs,
};

mod constants;

mod context;
pub use context::{BridgeContext, L1Provider, L2Provider};

pub mod flows;

/// Connects to both layers and runs the flow of the command.
pub async fn run(cli: Cli) -> eyre::Result<()> {
    let ctx = BridgeContext::connect(&cli).await?;
    flows::run(&ctx, cli.command).await
}
