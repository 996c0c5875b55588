use super::{relay_deposit, relay_withdrawal, Asset, Balances};
use crate::{args::TransferArgs, constants::DEFAULT_AMOUNT, BridgeContext};
use alloy_primitives::U256;
use thanos_bridge_primitives::Layer;
use thanos_contracts::L2_ETH;
use thanos_messenger::CrossChainMessenger;
use tokio::time::Instant;

/// ETH is native on L1 and an ERC-20 predeploy on L2.
const BALANCES: Balances = Balances { name: "ETH", l1: Asset::Native, l2: Asset::Token(L2_ETH) };

pub(super) async fn run(ctx: &BridgeContext, args: TransferArgs) -> eyre::Result<()> {
    let amount = args.amount_or(DEFAULT_AMOUNT);
    if !args.skip_deposit {
        deposit(ctx, amount).await?;
    }
    if !args.skip_withdraw {
        withdraw(ctx, amount).await?;
    }
    Ok(())
}

async fn deposit(ctx: &BridgeContext, amount: U256) -> eyre::Result<()> {
    tracing::info!(target: "thanos::bridge", %amount, "Depositing ETH from L1 to L2");
    BALANCES.report(ctx).await?;
    let start = Instant::now();

    let l2_head = ctx.head(Layer::L2).await?;
    let tx_hash = ctx.messenger.deposit_eth(amount).await?;
    relay_deposit(ctx, tx_hash, l2_head).await?;

    BALANCES.report(ctx).await?;
    tracing::info!(target: "thanos::bridge", elapsed = ?start.elapsed(), "Deposit ETH done");
    Ok(())
}

async fn withdraw(ctx: &BridgeContext, amount: U256) -> eyre::Result<()> {
    tracing::info!(target: "thanos::bridge", %amount, "Withdrawing ETH from L2 to L1");
    let l1_head = ctx.head(Layer::L1).await?;
    let start = Instant::now();
    BALANCES.report(ctx).await?;

    let tx_hash = ctx.messenger.withdraw_eth(amount).await?;
    relay_withdrawal(ctx, tx_hash, l1_head).await?;

    BALANCES.report(ctx).await?;
    tracing::info!(target: "thanos::bridge", elapsed = ?start.elapsed(), "Withdraw ETH done");
    Ok(())
}
