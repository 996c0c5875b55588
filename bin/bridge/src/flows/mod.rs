//! The bridge flows. Each flow deposits and then withdraws an asset, logging transaction hashes,
//! statuses, balances and durations along the way.

use crate::{args::Command, BridgeContext};
use alloy_primitives::{Address, BlockNumber, TxHash};
use alloy_provider::Provider;
use thanos_bridge_primitives::{Layer, MessageDirection, MessageStatus};
use thanos_contracts::abi::IERC20;
use thanos_messenger::{finalize_withdrawal, CrossChainMessenger, STATUS_REPORT_INTERVAL};

mod erc20;
mod estimate_gas;
mod eth;
mod native_token;
mod portal;

/// Runs the flow of the command.
pub async fn run(ctx: &BridgeContext, command: Command) -> eyre::Result<()> {
    match command {
        Command::Erc20(args) => erc20::run(ctx, args).await,
        Command::Eth(args) => eth::run(ctx, args).await,
        Command::NativeToken(args) => native_token::run(ctx, args).await,
        Command::Portal(args) => portal::run(ctx, args).await,
        Command::EstimateGas => estimate_gas::run(ctx).await,
    }
}

/// An asset held by the wallet on one layer.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Asset {
    /// The native currency of the layer.
    Native,
    /// An ERC-20 token.
    Token(Address),
}

/// The asset moved by a flow, on each layer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Balances {
    pub(crate) name: &'static str,
    pub(crate) l1: Asset,
    pub(crate) l2: Asset,
}

impl Balances {
    /// Logs the wallet balances of the asset on both layers.
    pub(crate) async fn report(&self, ctx: &BridgeContext) -> eyre::Result<()> {
        let wallet = ctx.wallet();
        let l1 = match self.l1 {
            Asset::Native => ctx.l1().get_balance(wallet).await?,
            Asset::Token(token) => IERC20::new(token, ctx.l1()).balanceOf(wallet).call().await?,
        };
        let l2 = match self.l2 {
            Asset::Native => ctx.l2().get_balance(wallet).await?,
            Asset::Token(token) => IERC20::new(token, ctx.l2()).balanceOf(wallet).call().await?,
        };
        tracing::info!(target: "thanos::bridge", asset = self.name, %l1, %l2, "Balances");
        Ok(())
    }
}

/// Waits for the L1 receipt of the deposit, then for its relay on L2. `l2_head` is the L2 head
/// recorded before the deposit was submitted.
pub(crate) async fn relay_deposit(
    ctx: &BridgeContext,
    tx_hash: TxHash,
    l2_head: BlockNumber,
) -> eyre::Result<()> {
    tracing::info!(target: "thanos::bridge", %tx_hash, "Deposit transaction hash (on L1)");
    ctx.messenger.wait_for_receipt(Layer::L1, tx_hash, 1).await?;

    tracing::info!(target: "thanos::bridge", "Waiting for status to change to {}", MessageStatus::Relayed);
    let options = ctx.wait.with_from_block(l2_head);
    ctx.messenger
        .wait_for_message_status(
            tx_hash.into(),
            MessageDirection::L1ToL2,
            MessageStatus::Relayed,
            &options,
        )
        .await?;

    let relay = ctx
        .messenger
        .get_message_receipt(tx_hash.into(), MessageDirection::L1ToL2, options.from_block)
        .await?
        .and_then(|receipt| receipt.transaction_hash);
    if let Some(relay_tx) = relay {
        tracing::info!(target: "thanos::bridge", %relay_tx, "Relayed transaction (on L2)");
    }
    Ok(())
}

/// Waits for the L2 receipt of the withdrawal, then proves and finalizes it on L1. `l1_head` is
/// the L1 head recorded before the withdrawal was submitted.
pub(crate) async fn relay_withdrawal(
    ctx: &BridgeContext,
    tx_hash: TxHash,
    l1_head: BlockNumber,
) -> eyre::Result<()> {
    let receipt = ctx.messenger.wait_for_receipt(Layer::L2, tx_hash, 1).await?;
    tracing::info!(target: "thanos::bridge", tx_hash = %receipt.transaction_hash, "Withdrawal transaction hash (on L2)");

    let options = ctx.wait.with_from_block(l1_head);
    let outcome =
        finalize_withdrawal(&ctx.messenger, tx_hash.into(), &options, STATUS_REPORT_INTERVAL)
            .await?;
    tracing::info!(target: "thanos::bridge", tx_hash = %outcome.finalize.transaction_hash, status = %outcome.status, "Finalized message");
    Ok(())
}
