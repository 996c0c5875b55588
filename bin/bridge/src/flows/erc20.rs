use super::{relay_deposit, relay_withdrawal, Asset, Balances};
use crate::{args::TransferArgs, constants::DEFAULT_ERC20_AMOUNT, BridgeContext};
use alloy_primitives::{Address, U256};
use thanos_bridge_primitives::Layer;
use thanos_messenger::CrossChainMessenger;
use tokio::time::Instant;

pub(super) async fn run(ctx: &BridgeContext, args: TransferArgs) -> eyre::Result<()> {
    let (l1_token, l2_token) = ctx.contracts.erc20_pair()?;
    let balances =
        Balances { name: "ERC20", l1: Asset::Token(l1_token), l2: Asset::Token(l2_token) };
    let amount = args.amount_or(DEFAULT_ERC20_AMOUNT);

    if !args.skip_deposit {
        deposit(ctx, &balances, l1_token, l2_token, amount).await?;
    }
    if !args.skip_withdraw {
        withdraw(ctx, &balances, l1_token, l2_token, amount).await?;
    }
    Ok(())
}

async fn deposit(
    ctx: &BridgeContext,
    balances: &Balances,
    l1_token: Address,
    l2_token: Address,
    amount: U256,
) -> eyre::Result<()> {
    tracing::info!(target: "thanos::bridge", %l1_token, %l2_token, %amount, "Depositing ERC20");
    balances.report(ctx).await?;
    let start = Instant::now();

    let approval = ctx.messenger.approve_erc20(l1_token, l2_token, amount).await?;
    ctx.messenger.wait_for_receipt(Layer::L1, approval, 1).await?;
    tracing::info!(target: "thanos::bridge", tx_hash = %approval, "Approval ERC20 token transaction hash (on L1)");

    let l2_head = ctx.head(Layer::L2).await?;
    let tx_hash = ctx.messenger.bridge_erc20(l1_token, l2_token, amount).await?;
    relay_deposit(ctx, tx_hash, l2_head).await?;

    balances.report(ctx).await?;
    tracing::info!(target: "thanos::bridge", elapsed = ?start.elapsed(), "Deposit ERC20 token done");
    Ok(())
}

async fn withdraw(
    ctx: &BridgeContext,
    balances: &Balances,
    l1_token: Address,
    l2_token: Address,
    amount: U256,
) -> eyre::Result<()> {
    tracing::info!(target: "thanos::bridge", %l1_token, %l2_token, %amount, "Withdrawing ERC20");
    let l1_head = ctx.head(Layer::L1).await?;
    let start = Instant::now();
    balances.report(ctx).await?;

    let tx_hash = ctx.messenger.withdraw_erc20(l1_token, l2_token, amount).await?;
    relay_withdrawal(ctx, tx_hash, l1_head).await?;

    balances.report(ctx).await?;
    tracing::info!(target: "thanos::bridge", elapsed = ?start.elapsed(), "Withdraw ERC20 token done");
    Ok(())
}
