use crate::{
    constants::{ESTIMATE_GAS_RECIPIENT, ESTIMATE_GAS_VALUE},
    BridgeContext,
};
use alloy_primitives::U256;
use alloy_provider::Provider;
use alloy_rpc_types_eth::TransactionRequest;
use alloy_serde::WithOtherFields;
use thanos_bridge_primitives::{GasCostReport, Layer};
use thanos_messenger::{estimate_l2_gas_cost, CrossChainMessenger, L2GasProvider};

pub(super) async fn run(ctx: &BridgeContext) -> eyre::Result<()> {
    let l2 = ctx.l2();
    let wallet = ctx.wallet();

    let request = TransactionRequest::default()
        .from(wallet)
        .to(ESTIMATE_GAS_RECIPIENT)
        .value(ESTIMATE_GAS_VALUE);
    let request = populate(ctx, request).await?;

    let estimated_l1 = l2.estimate_l1_gas_cost(request.clone()).await?;
    let estimated_l2 = estimate_l2_gas_cost(&request)
        .ok_or_else(|| eyre::eyre!("gasLimit undefined"))?;
    tracing::info!(target: "thanos::bridge", %estimated_l1, %estimated_l2, "Estimated transaction cost");

    let tx_hash = *l2.send_transaction(WithOtherFields::new(request)).await?.tx_hash();
    let receipt = ctx.messenger.wait_for_receipt(Layer::L2, tx_hash, 1).await?;
    tracing::info!(target: "thanos::bridge", %tx_hash, "Transaction hash");

    let actual_l1 = l2.l1_fee(tx_hash).await?.unwrap_or(U256::ZERO);
    let report = GasCostReport {
        estimated_l1,
        estimated_l2,
        actual_l1,
        actual_l2: receipt.execution_cost(),
    };
    tracing::info!(target: "thanos::bridge", "Gas cost report\n{report}");
    Ok(())
}

/// Completes the request as an EIP-1559 transaction, so that it can be priced before being sent.
async fn populate(
    ctx: &BridgeContext,
    request: TransactionRequest,
) -> eyre::Result<TransactionRequest> {
    let l2 = ctx.l2();
    let chain_id = l2.get_chain_id().await?;
    let nonce = l2.get_transaction_count(ctx.wallet()).await?;
    let gas_limit = l2.estimate_gas(WithOtherFields::new(request.clone())).await?;
    let fees = l2.estimate_eip1559_fees().await?;

    let mut request = request
        .nonce(nonce)
        .gas_limit(gas_limit)
        .max_fee_per_gas(fees.max_fee_per_gas)
        .max_priority_fee_per_gas(fees.max_priority_fee_per_gas);
    request.chain_id = Some(chain_id);
    Ok(request)
}
