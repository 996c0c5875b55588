use super::{relay_deposit, relay_withdrawal, Asset, Balances};
use crate::{args::TransferArgs, constants::DEFAULT_AMOUNT, BridgeContext};
use alloy_primitives::U256;
use thanos_bridge_primitives::Layer;
use thanos_messenger::CrossChainMessenger;
use tokio::time::Instant;

pub(super) async fn run(ctx: &BridgeContext, args: TransferArgs) -> eyre::Result<()> {
    let balances = Balances {
        name: "native token",
        l1: Asset::Token(ctx.contracts.native_token),
        l2: Asset::Native,
    };
    let amount = args.amount_or(DEFAULT_AMOUNT);

    if !args.skip_deposit {
        deposit(ctx, &balances, amount).await?;
    }
    if !args.skip_withdraw {
        withdraw(ctx, &balances, amount).await?;
    }
    Ok(())
}

async fn deposit(ctx: &BridgeContext, balances: &Balances, amount: U256) -> eyre::Result<()> {
    tracing::info!(target: "thanos::bridge", %amount, "Depositing native token");
    balances.report(ctx).await?;
    let start = Instant::now();

    let approval = ctx.messenger.approve_native_token(amount).await?;
    ctx.messenger.wait_for_receipt(Layer::L1, approval, 1).await?;
    tracing::info!(target: "thanos::bridge", tx_hash = %approval, "Approval native token transaction hash (on L1)");

    let l2_head = ctx.head(Layer::L2).await?;
    let tx_hash = ctx.messenger.bridge_native_token(amount).await?;
    relay_deposit(ctx, tx_hash, l2_head).await?;

    balances.report(ctx).await?;
    tracing::info!(target: "thanos::bridge", elapsed = ?start.elapsed(), "Deposit native token done");
    Ok(())
}

async fn withdraw(ctx: &BridgeContext, balances: &Balances, amount: U256) -> eyre::Result<()> {
    tracing::info!(target: "thanos::bridge", %amount, "Withdrawing native token");
    let l1_head = ctx.head(Layer::L1).await?;
    let start = Instant::now();
    balances.report(ctx).await?;

    let tx_hash = ctx.messenger.withdraw_native_token(amount).await?;
    relay_withdrawal(ctx, tx_hash, l1_head).await?;

    balances.report(ctx).await?;
    tracing::info!(target: "thanos::bridge", elapsed = ?start.elapsed(), "Withdraw native token done");
    Ok(())
}
