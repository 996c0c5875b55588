use super::{Asset, Balances};
use crate::{args::TransferArgs, constants::DEFAULT_AMOUNT, BridgeContext};
use alloy_primitives::U256;
use alloy_provider::Provider;
use thanos_bridge_primitives::{DepositTransactionRequest, Layer, WithdrawalRequest};
use thanos_contracts::abi::IERC20;
use thanos_messenger::Portal;
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
    balances.report(ctx).await?;
    let start = Instant::now();
    let portal = &ctx.portal;

    let token = IERC20::new(ctx.contracts.native_token, ctx.l1());
    let approval = *token.approve(portal.portal_address(), amount).send().await?.tx_hash();
    portal.wait_for_receipt(Layer::L1, approval, 1).await?;
    tracing::info!(target: "thanos::bridge", tx_hash = %approval, "Approval native token transaction hash (on L1)");

    let tx_hash =
        portal.deposit_transaction(DepositTransactionRequest::transfer(ctx.wallet(), amount)).await?;
    let receipt = portal.wait_for_receipt(Layer::L1, tx_hash, 1).await?;
    tracing::info!(target: "thanos::bridge", %tx_hash, "Deposit transaction (on L1)");

    let Some(relay_tx) = portal.waiting_deposit_transaction_relayed(&receipt, &ctx.wait).await?
    else {
        eyre::bail!("Relay tx hash empty");
    };
    tracing::info!(target: "thanos::bridge", %relay_tx, "Relayed transaction (on L2)");
    let relay_receipt = ctx.l2().get_transaction_receipt(relay_tx).await?;
    tracing::info!(target: "thanos::bridge", receipt = ?relay_receipt, "Relayed transaction receipt (on L2)");

    balances.report(ctx).await?;
    tracing::info!(target: "thanos::bridge", elapsed = ?start.elapsed(), "Deposit via the optimism portal done");
    Ok(())
}

async fn withdraw(ctx: &BridgeContext, balances: &Balances, amount: U256) -> eyre::Result<()> {
    let start = Instant::now();
    balances.report(ctx).await?;
    let portal = &ctx.portal;

    let tx_hash =
        portal.initiate_withdrawal(WithdrawalRequest::transfer(ctx.wallet(), amount)).await?;
    let receipt = portal.wait_for_receipt(Layer::L2, tx_hash, 1).await?;
    tracing::info!(target: "thanos::bridge", %tx_hash, "Withdrawal transaction (on L2)");

    let withdrawal = portal.calculate_withdrawal_message(&receipt).await?;
    tracing::info!(target: "thanos::bridge", withdrawal_hash = %withdrawal.withdrawal_hash, l2_block_number = withdrawal.l2_block_number, "Withdrawal message");

    let status = portal.get_message_status(&receipt).await?;
    tracing::info!(target: "thanos::bridge", %status, "Withdrawal transaction status");

    let status = portal.wait_for_withdrawal_tx_ready_for_relay(&receipt, &ctx.wait).await?;
    tracing::info!(target: "thanos::bridge", %status, "Withdrawal transaction output published");

    let prove_tx = portal.prove_withdrawal_transaction(&withdrawal).await?;
    portal.wait_for_receipt(Layer::L1, prove_tx, 1).await?;
    tracing::info!(target: "thanos::bridge", tx_hash = %prove_tx, "Proved transaction (on L1)");
    let status = portal.get_message_status(&receipt).await?;
    tracing::info!(target: "thanos::bridge", %status, "Status after proving");

    portal.wait_for_finalization(&withdrawal, &ctx.wait).await?;
    let finalize_tx = portal.finalize_withdrawal_transaction(&withdrawal).await?;
    portal.wait_for_receipt(Layer::L1, finalize_tx, 1).await?;
    tracing::info!(target: "thanos::bridge", tx_hash = %finalize_tx, "Finalize transaction (on L1)");
    let status = portal.get_message_status(&receipt).await?;
    tracing::info!(target: "thanos::bridge", %status, "Status after finalizing");

    // The withdrawn native token is credited to the wallet as an allowance of the portal.
    let token = IERC20::new(ctx.contracts.native_token, ctx.l1());
    let transfer = *token
        .transferFrom(portal.portal_address(), ctx.wallet(), amount)
        .send()
        .await?
        .tx_hash();
    portal.wait_for_receipt(Layer::L1, transfer, 1).await?;
    tracing::info!(target: "thanos::bridge", tx_hash = %transfer, "Transfer transaction from the optimism portal to the wallet");

    balances.report(ctx).await?;
    tracing::info!(target: "thanos::bridge", elapsed = ?start.elapsed(), "Withdraw via the optimism portal done");
    Ok(())
}
